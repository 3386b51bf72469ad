//! 接口错误类型
//!
//! 400 参数错误、404 无数据、500 其他所有失败

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;
use crate::services::ProviderError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Symbol is required")]
    MissingSymbol,

    #[error("No data found")]
    NoData,

    #[error("invalid timestamp {0:?}: expected Unix seconds")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingSymbol => StatusCode::BAD_REQUEST,
            ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::InvalidTimestamp(_) | ApiError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
