//! Yahoo Finance 数据源
//!
//! 对接 query2.finance.yahoo.com 的搜索接口和 chart 接口
//!
//! ## 接口
//! - GET /v1/finance/search - 代码搜索
//! - GET /v8/finance/chart/{symbol} - 历史K线

mod chart;
mod common;
mod search;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{PriceSeries, SearchQuote};
use crate::services::provider::{HistoryRequest, MarketDataProvider, ProviderError};

/// Yahoo Finance 数据源
///
/// HTTP 客户端只创建一次，所有请求共享连接池
pub struct YahooProvider {
    client: Client,
    search_url: Url,
    chart_url: Url,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let client = common::build_client(config)?;
        Self::with_client(client, &config.search_url, &config.chart_url)
    }

    pub fn with_client(client: Client, search_url: &str, chart_url: &str) -> anyhow::Result<Self> {
        let search_url = Url::parse(search_url)
            .with_context(|| format!("无效的搜索接口地址: {}", search_url))?;
        let chart_url = Url::parse(chart_url)
            .with_context(|| format!("无效的 chart 接口地址: {}", chart_url))?;
        if chart_url.cannot_be_a_base() {
            anyhow::bail!("chart 接口地址不能拼接路径: {}", chart_url);
        }

        Ok(Self {
            client,
            search_url,
            chart_url,
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchQuote>, ProviderError> {
        search::fetch_search(&self.client, &self.search_url, query, limit).await
    }

    async fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        chart::fetch_chart(&self.client, &self.chart_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        assert!(YahooProvider::new(&ProviderConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_urls() {
        let client = Client::new();
        assert!(YahooProvider::with_client(client.clone(), "not a url", "https://example.com/chart").is_err());
        assert!(YahooProvider::with_client(client, "https://example.com/search", "mailto:chart@example.com").is_err());
    }
}
