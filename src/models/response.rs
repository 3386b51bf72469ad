//! 通用错误响应模型
//!
//! 成功时直接返回 JSON 数组，失败时统一返回 `{"error": "..."}`

use serde::{Deserialize, Serialize};

/// 错误响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误信息
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
