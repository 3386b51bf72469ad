//! 搜索与历史数据业务逻辑
//!
//! 参数校验、时间窗口选择、结果整形，数据获取委托给 [`MarketDataProvider`]

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone};
use chrono_tz::Tz;

use crate::config::HistoryConfig;
use crate::error::ApiError;
use crate::models::{Bar, HistoryQuery, SearchResult};
use crate::services::provider::{HistoryRequest, HistorySpan, MarketDataProvider};

/// 单次搜索最多返回的结果数
pub const SEARCH_LIMIT: usize = 10;

/// start/end 转换为日历时间所用的时区
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowZone {
    /// 系统本地时区
    Local,
    Named(Tz),
}

impl WindowZone {
    pub fn from_name(name: Option<&str>) -> anyhow::Result<Self> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => Ok(WindowZone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(WindowZone::Named)
                .map_err(|e| anyhow::anyhow!("未知时区 {}: {}", name, e)),
        }
    }

    /// Unix 秒转换为该时区下的日历时间，超出范围返回 None
    pub fn to_calendar(&self, secs: i64) -> Option<DateTime<FixedOffset>> {
        match self {
            WindowZone::Local => Local.timestamp_opt(secs, 0).single().map(|dt| fix(&dt)),
            WindowZone::Named(tz) => tz.timestamp_opt(secs, 0).single().map(|dt| fix(&dt)),
        }
    }
}

fn fix<T: TimeZone>(dt: &DateTime<T>) -> DateTime<FixedOffset> {
    let offset = dt.offset().fix();
    dt.with_timezone(&offset)
}

/// 历史数据默认参数
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDefaults {
    pub interval: String,
    pub range: String,
    pub zone: WindowZone,
}

impl HistoryDefaults {
    pub fn from_config(config: &HistoryConfig) -> anyhow::Result<Self> {
        Ok(Self {
            interval: config.default_interval.clone(),
            range: config.default_range.clone(),
            zone: WindowZone::from_name(config.window_timezone.as_deref())?,
        })
    }
}

impl Default for HistoryDefaults {
    fn default() -> Self {
        let config = HistoryConfig::default();
        Self {
            interval: config.default_interval,
            range: config.default_range,
            zone: WindowZone::Local,
        }
    }
}

/// 代码搜索
///
/// 关键字为空时直接返回空列表，不请求数据源；只含空白的关键字照常转发
pub async fn search(
    provider: &dyn MarketDataProvider,
    q: Option<&str>,
) -> Result<Vec<SearchResult>, ApiError> {
    let query = match q.filter(|q| !q.is_empty()) {
        Some(query) => query,
        None => return Ok(Vec::new()),
    };

    let quotes = provider.search(query, SEARCH_LIMIT).await?;
    log::debug!("搜索 {:?} 返回 {} 条结果", query, quotes.len());

    Ok(quotes
        .into_iter()
        .take(SEARCH_LIMIT)
        .filter_map(SearchResult::from_quote)
        .collect())
}

/// 获取历史K线
pub async fn history(
    provider: &dyn MarketDataProvider,
    query: &HistoryQuery,
    defaults: &HistoryDefaults,
) -> Result<Vec<Bar>, ApiError> {
    let request = build_request(query, defaults)?;
    let series = provider.history(&request).await?;

    if series.is_empty() {
        return Err(ApiError::NoData);
    }

    let total = series.rows.len();
    log::debug!("{}: 数据源返回 {} 行 ({:?} 索引)", request.symbol, total, series.index);
    let bars: Vec<Bar> = series.rows.iter().filter_map(|row| row.to_bar()).collect();
    if bars.len() < total {
        log::debug!("{}: 跳过 {} 行不完整数据", request.symbol, total - bars.len());
    }

    Ok(bars)
}

/// 由查询参数构造数据源请求
///
/// start 和 end 同时存在时按时间窗口请求，否则按相对区间请求
pub fn build_request(
    query: &HistoryQuery,
    defaults: &HistoryDefaults,
) -> Result<HistoryRequest, ApiError> {
    let symbol = present(&query.symbol).ok_or(ApiError::MissingSymbol)?;
    let interval = present(&query.interval).unwrap_or(&defaults.interval);

    let span = match (present(&query.start), present(&query.end)) {
        (Some(start), Some(end)) => HistorySpan::Window {
            start: to_calendar(start, defaults.zone)?,
            end: to_calendar(end, defaults.zone)?,
        },
        (start, end) => {
            if start.is_some() || end.is_some() {
                log::warn!("{}: 只提供了 start/end 之一，按 range 请求", symbol);
            }
            let range = present(&query.range).unwrap_or(&defaults.range);
            HistorySpan::Range(range.to_string())
        }
    };

    Ok(HistoryRequest {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        span,
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn to_calendar(raw: &str, zone: WindowZone) -> Result<DateTime<FixedOffset>, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| zone.to_calendar(secs))
        .ok_or_else(|| ApiError::InvalidTimestamp(raw.to_string()))
}
