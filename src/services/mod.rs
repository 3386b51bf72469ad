//! 业务逻辑服务模块
//!
//! 数据源抽象、具体数据源实现以及接口业务逻辑

pub mod market_service; // 搜索与历史数据逻辑
pub mod provider;       // 数据源抽象
pub mod yahoo;          // Yahoo Finance 数据源

#[cfg(test)]
pub mod testing;

pub use provider::{MarketDataProvider, ProviderError};
pub use yahoo::YahooProvider;
