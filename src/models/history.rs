//! 历史K线数据模型
//!
//! `Bar` 为图表组件使用的输出格式，`PriceSeries` 为数据源返回的原始序列

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 单根K线（OHLCV）
///
/// `time` 为 Unix 秒级时间戳
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// 历史数据查询参数
#[derive(Debug, Default)]
pub struct HistoryQuery {
    /// 代码（必填）
    pub symbol: Option<String>,
    /// K线周期，如 1m、1h、1d
    pub interval: Option<String>,
    /// 相对区间，如 5d、1mo、1y
    pub range: Option<String>,
    /// 开始时间（Unix 秒）
    pub start: Option<String>,
    /// 结束时间（Unix 秒）
    pub end: Option<String>,
}

impl HistoryQuery {
    /// 由原始查询参数构造，重复的键取最后一个值
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            symbol: super::last_value(pairs, "symbol"),
            interval: super::last_value(pairs, "interval"),
            range: super::last_value(pairs, "range"),
            start: super::last_value(pairs, "start"),
            end: super::last_value(pairs, "end"),
        }
    }
}

/// 时间索引类型
///
/// 日线及以上周期为 `Date`（按交易所时区取当日零点），日内周期为 `Datetime`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Date,
    Datetime,
}

impl IndexKind {
    pub fn for_interval(interval: &str) -> Self {
        match interval {
            "1d" | "5d" | "1wk" | "1mo" | "3mo" => IndexKind::Date,
            _ => IndexKind::Datetime,
        }
    }
}

/// 数据源返回的一行数据，各字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceRow {
    pub time: Option<DateTime<FixedOffset>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// 数据源返回的价格序列，按时间先后排列
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub index: IndexKind,
    pub rows: Vec<PriceRow>,
}

impl PriceSeries {
    pub fn empty(index: IndexKind) -> Self {
        Self {
            index,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PriceRow {
    /// 转换为输出K线，缺少时间或任一价格的行返回 None，成交量缺失记为 0
    pub fn to_bar(&self) -> Option<Bar> {
        let time = self.time?;
        Some(Bar {
            time: time.timestamp(),
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
            volume: self.volume.unwrap_or(0),
        })
    }
}
