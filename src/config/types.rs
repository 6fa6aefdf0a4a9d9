//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 语音合成配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL，生成音频的 URL 以此为前缀
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub debug: bool,

    /// 逗号分隔的跨域来源列表
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// 必填，不允许为空
    #[serde(default)]
    pub secret_key: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            debug: false,
            allowed_origins: default_allowed_origins(),
            secret_key: String::new(),
        }
    }
}

// 不打印 secret_key
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("allowed_origins", &self.allowed_origins)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }

    /// 拆分逗号分隔的来源列表，忽略空项
    pub fn allowed_origins_list(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 连接字符串
    #[serde(default = "default_db_url")]
    pub url: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_url() -> String {
    "sqlite:data/voxclone.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// SQLite 文件路径（内存库返回 None），用于启动时创建父目录
    pub fn sqlite_file(&self) -> Option<PathBuf> {
        let rest = self.url.strip_prefix("sqlite:")?;
        let rest = rest.trim_start_matches("//");
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传根目录，同时以 /audio 对外暴露
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// 上传文件最大大小（字节）
    /// 仅声明，不在业务层强制；传输层另有固定上限
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_max_upload_size() -> u64 {
    50_000_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 合成后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisEngine {
    /// 外部 XTTS 模型服务
    #[default]
    XttsHttp,
    /// 固定音频文件
    Fixture,
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// false 时只写占位文件
    #[serde(default = "default_synthesis_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub engine: SynthesisEngine,

    /// 模型服务基础 URL
    #[serde(default = "default_synthesis_url")]
    pub url: String,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// 单次合成请求超时时间（秒）
    #[serde(default = "default_synthesis_timeout")]
    pub timeout_secs: u64,

    /// engine = fixture 时使用的音频文件
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

fn default_synthesis_enabled() -> bool {
    true
}

fn default_synthesis_url() -> String {
    "http://localhost:8020".to_string()
}

fn default_model_name() -> String {
    "tts_models/multilingual/multi-dataset/xtts_v2".to_string()
}

fn default_synthesis_timeout() -> u64 {
    300
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            enabled: default_synthesis_enabled(),
            engine: SynthesisEngine::default(),
            url: default_synthesis_url(),
            model_name: default_model_name(),
            timeout_secs: default_synthesis_timeout(),
            fixture_path: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.max_upload_size, 50_000_000);
        assert_eq!(config.synthesis.engine, SynthesisEngine::XttsHttp);
        assert!(config.synthesis.enabled);
        assert_eq!(config.database.url, "sqlite:data/voxclone.db?mode=rwc");
    }

    #[test]
    fn test_public_base_url() {
        let mut config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:8000");

        config.base_url = Some("https://voices.example.com".to_string());
        assert_eq!(config.public_base_url(), "https://voices.example.com");
    }

    #[test]
    fn test_allowed_origins_list() {
        let config = ServerConfig {
            allowed_origins: "http://a.test, ,http://b.test ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins_list(),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServerConfig {
            secret_key: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_sqlite_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_file(), Some(PathBuf::from("data/voxclone.db")));

        let memory = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        assert_eq!(memory.sqlite_file(), None);
    }
}
