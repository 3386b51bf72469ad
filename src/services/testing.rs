//! 测试用数据源，记录调用参数并返回预设结果

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{IndexKind, PriceSeries, SearchQuote};
use crate::services::provider::{HistoryRequest, MarketDataProvider, ProviderError};

pub struct StubProvider {
    quotes: Vec<SearchQuote>,
    series: PriceSeries,
    failure: Option<String>,
    search_calls: Mutex<Vec<(String, usize)>>,
    history_calls: Mutex<Vec<HistoryRequest>>,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            quotes: Vec::new(),
            series: PriceSeries::empty(IndexKind::Date),
            failure: None,
            search_calls: Mutex::new(Vec::new()),
            history_calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubProvider {
    pub fn with_quotes(quotes: Vec<SearchQuote>) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    pub fn with_series(series: PriceSeries) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    /// 所有调用都返回 `ProviderError::Decode(message)`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn search_calls(&self) -> Vec<(String, usize)> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> Vec<HistoryRequest> {
        self.history_calls.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::Decode(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchQuote>, ProviderError> {
        self.search_calls.lock().unwrap().push((query.to_string(), limit));
        self.check()?;
        Ok(self.quotes.clone())
    }

    async fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        self.history_calls.lock().unwrap().push(request.clone());
        self.check()?;
        Ok(self.series.clone())
    }
}
