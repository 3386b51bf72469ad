//! 代码搜索数据模型

use serde::{Deserialize, Serialize};

/// 数据源返回的单条搜索结果（原始字段）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuote {
    pub symbol: Option<String>,
    /// 简称
    pub shortname: Option<String>,
    /// 全称
    pub longname: Option<String>,
    /// 品种类型，如 EQUITY、ETF、CRYPTOCURRENCY
    #[serde(rename = "quoteType")]
    pub quote_type: Option<String>,
    pub exchange: Option<String>,
}

/// 对外返回的搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub exchange: Option<String>,
}

/// 搜索查询参数
#[derive(Debug, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// 由原始查询参数构造，重复的键取最后一个值
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            q: super::last_value(pairs, "q"),
        }
    }
}

impl SearchResult {
    /// 由原始结果构造，没有代码的结果返回 None
    ///
    /// 名称取值顺序：非空简称，其次非空全称，都没有则为空
    pub fn from_quote(quote: SearchQuote) -> Option<Self> {
        let symbol = non_empty(quote.symbol)?;
        let name = non_empty(quote.shortname).or_else(|| non_empty(quote.longname));

        Some(Self {
            symbol,
            name,
            kind: quote.quote_type,
            exchange: quote.exchange,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
