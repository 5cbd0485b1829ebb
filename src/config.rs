//! Application configuration module / 应用配置模块
//!
//! Configuration is loaded from config.json.
//! Creates a default config file on first run / 首次运行时创建默认配置文件

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name / 默认配置文件名
pub const CONFIG_FILE: &str = "config.json";

/// `db_file` value selecting a private in-memory database
pub const IN_MEMORY_DB: &str = ":memory:";

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Database configuration / 数据库配置
    pub database: DatabaseConfig,
    /// Indexing configuration / 索引配置
    pub index: IndexConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
    /// Origins allowed to call the API from a browser; empty disables CORS / 允许跨域的来源
    pub allowed_origins: Vec<String>,
}

/// Database configuration / 数据库配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Data directory path / 数据目录路径
    pub data_dir: String,
    /// Database file name (relative to data_dir), or `:memory:` / 数据库文件名
    pub db_file: String,
    /// Pool size / 连接池大小
    pub max_connections: u32,
    /// SQLite busy timeout in milliseconds / 锁等待超时
    pub busy_timeout_ms: u64,
}

/// Indexing configuration / 索引配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Extension a source file must carry, without the dot / 允许的源文件扩展名
    pub allowed_extension: String,
    /// Store text after the last END marker as a final page / 是否保存未闭合的尾页
    pub flush_trailing_page: bool,
    /// Directory every indexed file must resolve into; required by `serve` / 可索引文件的根目录
    pub source_root: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8190,
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_file: "index.sqlite".to_string(),
            max_connections: 4,
            busy_timeout_ms: 10_000,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            allowed_extension: "txt".to_string(),
            flush_trailing_page: true,
            source_root: None,
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.db_file == IN_MEMORY_DB
    }

    /// Get the full database path / 获取完整的数据库路径
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.db_file)
    }
}

impl ServerConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Config file in the current working directory / 获取配置文件路径
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config(config_path: &Path) -> Result<AppConfig> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", config_path))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config(config_path, &config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config_path: &Path, config: &AppConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config file {:?}", config_path))?;

    Ok(())
}
