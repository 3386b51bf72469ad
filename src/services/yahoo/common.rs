//! 公共常量和辅助函数

use anyhow::Context;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::services::provider::ProviderError;

/// chart 接口报告“无数据/代码不存在”时使用的错误码
pub const NOT_FOUND_CODE: &str = "Not Found";

/// 构建共享的 HTTP 客户端
pub fn build_client(config: &ProviderConfig) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .cookie_store(true)
        .build()
        .context("创建 HTTP 客户端失败")
}

/// 读取响应体并解析 JSON
///
/// 错误状态码下仍尝试解析响应体，数据源会在错误响应里携带错误描述；
/// 响应体无法解析时，非 2xx 状态返回 `Status`，否则返回 `Decode`
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<T>(&text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Err(ProviderError::Status(status)),
        Err(e) => {
            let preview: String = text.chars().take(200).collect();
            log::debug!("无法解析的响应: {}", preview);
            Err(ProviderError::Decode(e.to_string()))
        }
    }
}
