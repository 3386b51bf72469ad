//! 数据源抽象
//!
//! 搜索和历史K线两个能力，接口层只依赖此 trait

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::models::{PriceSeries, SearchQuote};

/// 数据源错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// 数据源在响应体中报告的错误
    #[error("{code}: {description}")]
    Api { code: String, description: String },

    #[error("malformed provider response: {0}")]
    Decode(String),
}

/// 历史数据时间范围
#[derive(Debug, Clone, PartialEq)]
pub enum HistorySpan {
    /// 相对区间，如 1mo
    Range(String),
    /// 明确的起止时间
    Window {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub symbol: String,
    pub interval: String,
    pub span: HistorySpan,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 按关键字搜索代码，最多返回 `limit` 条
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchQuote>, ProviderError>;

    /// 获取历史K线序列
    async fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError>;
}
