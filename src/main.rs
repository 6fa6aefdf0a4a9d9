//! Voxclone - 声音克隆 API 服务
//!
//! 启动流程：配置 → 日志 → 数据库 → 适配器 → HTTP 服务器 → 关闭时释放模型

use std::sync::Arc;

use voxclone::application::{GenerationConfig, SpeechSynthesizerPort};
use voxclone::config::{load_config, print_config, AppConfig, SynthesisEngine};
use voxclone::infrastructure::adapters::{
    FixtureLoader, LocalFileStorage, ModelLoader, SymphoniaAudioProbe, VoiceCloningService,
    XttsHttpConfig, XttsHttpLoader,
};
use voxclone::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voxclone::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteGeneratedAudioRepository,
    SqliteVoiceProfileRepository,
};

fn init_tracing(config: &AppConfig) {
    let level = if config.server.debug {
        "debug"
    } else {
        config.log.level.as_str()
    };
    let log_filter = format!("{},voxclone={},tower_http=debug", level, level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 根据配置选择模型后端
fn model_loader(config: &AppConfig) -> anyhow::Result<Box<dyn ModelLoader>> {
    let synthesis = &config.synthesis;
    let loader: Box<dyn ModelLoader> = match synthesis.engine {
        SynthesisEngine::XttsHttp => Box::new(XttsHttpLoader::new(
            XttsHttpConfig::new(&synthesis.url)
                .with_model_name(&synthesis.model_name)
                .with_timeout(synthesis.timeout_secs),
        )),
        SynthesisEngine::Fixture => {
            let path = synthesis
                .fixture_path
                .clone()
                .ok_or_else(|| anyhow::anyhow!("synthesis.fixture_path is not set"))?;
            Box::new(FixtureLoader::new(path))
        }
    };
    Ok(loader)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Voxclone {} - Voice Cloner API", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据库目录存在
    if let Some(parent) = config
        .database
        .sqlite_file()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&parent).await?;
        }
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.url, config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建适配器
    let voice_repo = Arc::new(SqliteVoiceProfileRepository::new(pool.clone()));
    let generated_repo = Arc::new(SqliteGeneratedAudioRepository::new(pool.clone()));
    let storage = Arc::new(LocalFileStorage::new(&config.storage.upload_dir).await?);
    let probe = Arc::new(SymphoniaAudioProbe::new());

    // 模型在第一次生成时才加载
    let synthesizer: Arc<dyn SpeechSynthesizerPort> =
        Arc::new(VoiceCloningService::new(model_loader(&config)?));

    let generation_config = GenerationConfig::new(
        config.synthesis.enabled,
        config.server.public_base_url(),
    );
    let state = AppState::new(
        generation_config,
        voice_repo,
        generated_repo,
        storage,
        synthesizer.clone(),
        probe,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_allowed_origins(config.server.allowed_origins_list());
    let server = HttpServer::new(server_config, Arc::new(state));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    synthesizer.unload().await;
    pool.close().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
