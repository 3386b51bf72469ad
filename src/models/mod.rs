pub mod history;
pub mod response;
pub mod search;

pub use history::*;
pub use response::*;
pub use search::*;

/// 原始查询参数，按出现顺序保留重复的键
pub type QueryPairs = Vec<(String, String)>;

/// 取某个键的值，键重复时以最后一次出现为准
fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}
