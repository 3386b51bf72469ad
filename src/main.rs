//! 行情代理服务
//!
//! 为K线图表前端提供代码搜索和历史K线两个 RESTful 接口
//! 数据来源：Yahoo Finance

mod config;     // 配置
mod error;      // 接口错误类型
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::market_service::HistoryDefaults;
use crate::services::{MarketDataProvider, YahooProvider};

/// 应用程序入口
///
/// 加载配置后启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::locate();
    let config = AppConfig::load(config_path.as_deref())?;

    // RUST_LOG 优先，其次使用配置中的日志级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match &config_path {
        Some(path) => log::info!("从 {} 加载配置成功", path.display()),
        None => log::info!("使用默认配置"),
    }

    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new(&config.provider)?);
    let provider = web::Data::from(provider);
    let defaults = web::Data::new(HistoryDefaults::from_config(&config.history)?);

    let bind_addr = config.bind_addr();
    log::info!("启动行情代理服务，监听 {}", bind_addr);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(provider.clone())
            .app_data(defaults.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_addr)
        .with_context(|| format!("绑定地址 {} 失败", bind_addr))?
        .run()
        .await
        .context("HTTP 服务异常退出")
}
