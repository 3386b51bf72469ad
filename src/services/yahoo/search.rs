//! 代码搜索

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::common::read_json;
use crate::models::SearchQuote;
use crate::services::provider::ProviderError;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

/// 搜索代码，返回数据源原始顺序
pub async fn fetch_search(
    client: &Client,
    url: &Url,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchQuote>, ProviderError> {
    let count = limit.to_string();
    log::debug!("请求搜索接口: {} q={}", url, query);

    let response = client
        .get(url.clone())
        .query(&[
            ("q", query),
            ("quotesCount", count.as_str()),
            ("newsCount", "0"),
            ("listsCount", "0"),
            ("enableFuzzyQuery", "false"),
        ])
        .send()
        .await?;

    let status = response.status();
    let envelope: SearchEnvelope = read_json(response).await?;
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }

    Ok(envelope.quotes)
}
