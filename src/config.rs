//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "MARKET_PROXY_CONFIG";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 行情数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// 代码搜索接口
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// K线（chart）接口，代码拼接在路径末尾
    #[serde(default = "default_chart_url")]
    pub chart_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 历史数据默认参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_interval")]
    pub default_interval: String,
    #[serde(default = "default_range")]
    pub default_range: String,
    /// start/end 转换为日历时间时使用的时区（IANA 名称），为空则使用系统本地时区
    #[serde(default)]
    pub window_timezone: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_search_url() -> String { "https://query2.finance.yahoo.com/v1/finance/search".to_string() }
fn default_chart_url() -> String { "https://query2.finance.yahoo.com/v8/finance/chart".to_string() }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string()
}
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_interval() -> String { "1d".to_string() }
fn default_range() -> String { "1mo".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            chart_url: default_chart_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_interval: default_interval(),
            default_range: default_range(),
            window_timezone: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 {} 失败", path.display()))?;
        Ok(config)
    }

    /// 查找配置文件：环境变量优先，其次 config.json、config/config.json
    pub fn locate() -> Option<PathBuf> {
        Self::locate_in(env::var(CONFIG_ENV).ok(), Path::new(""))
    }

    /// 在 `base` 目录下按顺序查找配置文件，`override_path` 非空时直接使用
    fn locate_in(override_path: Option<String>, base: &Path) -> Option<PathBuf> {
        if let Some(path) = override_path.filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }

        ["config.json", "config/config.json"]
            .iter()
            .map(|name| base.join(name))
            .find(|p| p.exists())
    }

    /// 加载配置，未找到配置文件时使用默认值
    ///
    /// 找到了文件但解析失败视为启动错误
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
