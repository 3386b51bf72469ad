//! 历史K线接口
//!
//! GET /api/history/?symbol=<代码>&interval=<周期>&range=<区间>&start=<Unix秒>&end=<Unix秒>

use actix_web::{web, HttpResponse, ResponseError, Result};

use crate::error::ApiError;
use crate::models::{HistoryQuery, QueryPairs};
use crate::services::market_service::{self, HistoryDefaults};
use crate::services::MarketDataProvider;

pub async fn history(
    provider: web::Data<dyn MarketDataProvider>,
    defaults: web::Data<HistoryDefaults>,
    pairs: web::Query<QueryPairs>,
) -> Result<HttpResponse> {
    let query = HistoryQuery::from_pairs(&pairs);
    match market_service::history(provider.get_ref(), &query, &defaults).await {
        Ok(bars) => Ok(HttpResponse::Ok().json(bars)),
        Err(e) => {
            match &e {
                ApiError::MissingSymbol | ApiError::NoData => {
                    log::warn!("获取历史数据 {:?} 失败: {}", query.symbol, e)
                }
                _ => log::error!("获取历史数据 {:?} 失败: {}", query.symbol, e),
            }
            Ok(e.error_response())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/history/", web::get().to(history))
        .route("/history", web::get().to(history));
}
