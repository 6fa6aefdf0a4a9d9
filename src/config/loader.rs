//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SynthesisEngine};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "VOXCLONE";

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOXCLONE_SERVER__PORT=8080`
/// - `VOXCLONE_SERVER__SECRET_KEY=...`
/// - `VOXCLONE_SERVER__ALLOWED_ORIGINS=http://localhost:3000,https://app.example.com`
/// - `VOXCLONE_SYNTHESIS__ENABLED=false`
/// - `VOXCLONE_SYNTHESIS__URL=http://xtts:8020`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索工作目录下的默认配置文件
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.debug", false)?
        .set_default("server.allowed_origins", "http://localhost:3000")?
        .set_default("database.url", "sqlite:data/voxclone.db?mode=rwc")?
        .set_default("database.max_connections", 5)?
        .set_default("storage.upload_dir", "./uploads")?
        .set_default("storage.max_upload_size", 50_000_000)?
        .set_default("synthesis.enabled", true)?
        .set_default("synthesis.engine", "xtts_http")?
        .set_default("synthesis.url", "http://localhost:8020")?
        .set_default(
            "synthesis.model_name",
            "tts_models/multilingual/multi-dataset/xtts_v2",
        )?
        .set_default("synthesis.timeout_secs", 300)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），层级分隔符为双下划线
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.secret_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "server.secret_key is required".to_string(),
        ));
    }

    if config.database.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database URL cannot be empty".to_string(),
        ));
    }

    match config.synthesis.engine {
        SynthesisEngine::XttsHttp if config.synthesis.url.is_empty() => {
            return Err(ConfigError::ValidationError(
                "Synthesis URL cannot be empty for the xtts_http engine".to_string(),
            ));
        }
        SynthesisEngine::Fixture if config.synthesis.fixture_path.is_none() => {
            return Err(ConfigError::ValidationError(
                "synthesis.fixture_path is required for the fixture engine".to_string(),
            ));
        }
        _ => {}
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不含密钥）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Debug: {}", config.server.debug);
    tracing::info!("Allowed Origins: {:?}", config.server.allowed_origins_list());
    tracing::info!("Database: {}", config.database.url);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Upload Directory: {:?}", config.storage.upload_dir);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Synthesis Enabled: {}", config.synthesis.enabled);
    if config.synthesis.enabled {
        tracing::info!("Synthesis Engine: {:?}", config.synthesis.engine);
        match config.synthesis.engine {
            SynthesisEngine::XttsHttp => {
                tracing::info!("Synthesis URL: {}", config.synthesis.url);
                tracing::info!("Synthesis Model: {}", config.synthesis.model_name);
                tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
            }
            SynthesisEngine::Fixture => {
                tracing::info!("Fixture Audio: {:?}", config.synthesis.fixture_path);
            }
        }
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.secret_key = "test-secret".to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_requires_secret_key() {
        let mut config = valid_config();
        config.server.secret_key = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_url() {
        let mut config = valid_config();
        config.database.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_engine_requirements() {
        let mut config = valid_config();
        config.synthesis.url = String::new();
        assert!(validate_config(&config).is_err());

        config.synthesis.engine = SynthesisEngine::Fixture;
        assert!(validate_config(&config).is_err());

        config.synthesis.fixture_path = Some(PathBuf::from("fixture.wav"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voxclone.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9100
            secret_key = "from-file"
            allowed_origins = "http://a.test,http://b.test"

            [synthesis]
            engine = "fixture"
            fixture_path = "demo.wav"
            enabled = false
            "#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.allowed_origins_list().len(), 2);
        assert_eq!(config.synthesis.engine, SynthesisEngine::Fixture);
        assert!(!config.synthesis.enabled);
        assert_eq!(config.storage.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.synthesis.timeout_secs, 300);
    }

    #[test]
    fn test_load_from_file_without_secret_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voxclone.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let result = load_config_from_path(Some(&path));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
