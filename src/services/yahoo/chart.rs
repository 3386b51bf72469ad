//! 历史K线（chart 接口）
//!
//! 响应为列式结构：`timestamp[]` 与 `indicators.quote[0].{open,high,low,close,volume}[]` 按下标对齐，
//! 各列都可能出现 null

use chrono::{DateTime, FixedOffset, Offset, TimeZone};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::common::{read_json, NOT_FOUND_CODE};
use crate::models::{IndexKind, PriceRow, PriceSeries};
use crate::services::provider::{HistoryRequest, HistorySpan, ProviderError};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<Option<i64>>>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// 交易所时区，如 America/New_York
    #[serde(rename = "exchangeTimezoneName")]
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// 获取历史K线
pub async fn fetch_chart(
    client: &Client,
    base: &Url,
    request: &HistoryRequest,
) -> Result<PriceSeries, ProviderError> {
    let url = chart_endpoint(base, &request.symbol);

    let mut params: Vec<(&str, String)> = vec![
        ("interval", request.interval.clone()),
        ("includePrePost", "false".to_string()),
        ("events", "div,splits".to_string()),
    ];
    match &request.span {
        HistorySpan::Range(range) => params.push(("range", range.clone())),
        HistorySpan::Window { start, end } => {
            params.push(("period1", start.timestamp().to_string()));
            params.push(("period2", end.timestamp().to_string()));
        }
    }
    log::debug!("请求 chart 接口: {} {:?}", url, params);

    let response = client.get(url).query(&params).send().await?;
    let envelope: ChartEnvelope = read_json(response).await?;

    into_series(envelope, IndexKind::for_interval(&request.interval))
}

fn chart_endpoint(base: &Url, symbol: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(symbol);
    }
    url
}

fn into_series(envelope: ChartEnvelope, index: IndexKind) -> Result<PriceSeries, ProviderError> {
    let chart = envelope.chart;

    if let Some(error) = chart.error {
        if error.code == NOT_FOUND_CODE {
            log::debug!("chart 无数据: {}", error.description);
            return Ok(PriceSeries::empty(index));
        }
        return Err(ProviderError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = match chart.result.and_then(|r| r.into_iter().next()) {
        Some(result) => result,
        None => return Ok(PriceSeries::empty(index)),
    };
    // 区间内没有成交时不返回 timestamp
    let timestamps = match result.timestamp {
        Some(timestamps) => timestamps,
        None => return Ok(PriceSeries::empty(index)),
    };

    let zone = result
        .meta
        .exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC);
    let columns = result.indicators.quote.into_iter().next().unwrap_or_default();

    let rows = timestamps
        .into_iter()
        .enumerate()
        .map(|(i, ts)| PriceRow {
            time: ts.and_then(|secs| row_time(secs, index, zone)),
            open: cell(&columns.open, i),
            high: cell(&columns.high, i),
            low: cell(&columns.low, i),
            close: cell(&columns.close, i),
            volume: cell(&columns.volume, i).map(|v| v.max(0.0) as u64),
        })
        .filter(|row| {
            row.open.is_some() || row.high.is_some() || row.low.is_some() || row.close.is_some()
        })
        .collect();

    Ok(PriceSeries { index, rows })
}

fn cell(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// 行时间：日线及以上取交易所时区当日零点，日内保留原始时间
fn row_time(secs: i64, index: IndexKind, zone: Tz) -> Option<DateTime<FixedOffset>> {
    let local = zone.timestamp_opt(secs, 0).single()?;
    let local = match index {
        IndexKind::Datetime => local,
        IndexKind::Date => local
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| zone.from_local_datetime(&midnight).earliest())
            .unwrap_or(local),
    };
    let offset = local.offset().fix();
    Some(local.with_timezone(&offset))
}
