//! 代码搜索接口
//!
//! GET /api/search/?q=<关键字>

use actix_web::{web, HttpResponse, ResponseError, Result};

use crate::models::{QueryPairs, SearchQuery};
use crate::services::market_service;
use crate::services::MarketDataProvider;

pub async fn search(
    provider: web::Data<dyn MarketDataProvider>,
    pairs: web::Query<QueryPairs>,
) -> Result<HttpResponse> {
    let query = SearchQuery::from_pairs(&pairs);
    match market_service::search(provider.get_ref(), query.q.as_deref()).await {
        Ok(results) => Ok(HttpResponse::Ok().json(results)),
        Err(e) => {
            log::error!("搜索 {:?} 失败: {}", query.q, e);
            Ok(e.error_response())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/search/", web::get().to(search))
        .route("/search", web::get().to(search));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchQuote;
    use crate::services::testing::StubProvider;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn app_data(stub: Arc<StubProvider>) -> web::Data<dyn MarketDataProvider> {
        let provider: Arc<dyn MarketDataProvider> = stub;
        web::Data::from(provider)
    }

    #[actix_web::test]
    async fn test_empty_query_returns_empty_array() {
        let stub = Arc::new(StubProvider::default());
        let app = test::init_service(
            App::new().app_data(app_data(stub.clone())).configure(config),
        )
        .await;

        for uri in ["/search/", "/search/?q=", "/search"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!([]));
        }
        assert!(stub.search_calls().is_empty());
    }

    #[actix_web::test]
    async fn test_search_results_shape() {
        let stub = Arc::new(StubProvider::with_quotes(vec![
            SearchQuote {
                symbol: Some("AAPL".into()),
                shortname: Some("Apple Inc.".into()),
                longname: Some("Apple Inc.".into()),
                quote_type: Some("EQUITY".into()),
                exchange: Some("NMS".into()),
            },
            SearchQuote {
                symbol: Some("APC.F".into()),
                longname: Some("Apple Inc.".into()),
                quote_type: Some("EQUITY".into()),
                exchange: Some("FRA".into()),
                ..SearchQuote::default()
            },
        ]));
        let app = test::init_service(
            App::new().app_data(app_data(stub.clone())).configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/search/?q=apple").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!([
                {"symbol": "AAPL", "name": "Apple Inc.", "type": "EQUITY", "exchange": "NMS"},
                {"symbol": "APC.F", "name": "Apple Inc.", "type": "EQUITY", "exchange": "FRA"}
            ])
        );
        assert_eq!(stub.search_calls(), vec![("apple".to_string(), 10)]);
    }

    #[actix_web::test]
    async fn test_repeated_query_key_uses_last_value() {
        let stub = Arc::new(StubProvider::default());
        let app = test::init_service(
            App::new().app_data(app_data(stub.clone())).configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/search/?q=a&q=b").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
        assert_eq!(stub.search_calls(), vec![("b".to_string(), 10)]);
    }

    #[actix_web::test]
    async fn test_provider_failure_is_500() {
        let stub = Arc::new(StubProvider::failing("upstream timed out"));
        let app = test::init_service(App::new().app_data(app_data(stub)).configure(config)).await;

        let req = test::TestRequest::get().uri("/search/?q=apple").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("upstream timed out"));
    }
}
