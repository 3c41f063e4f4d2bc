use anyhow::Context;
use birken_agent::{GeminiBackend, Translator};
use birken_engine::logging::init_logging;
use birken_engine::router::build_router;
use birken_engine::settings::Settings;
use birken_engine::state::AppState;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

// =========================================================================
// 主入口 (Main Entry)
// =========================================================================
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A. 加载配置与日志
    dotenv().ok(); // 读取 .env 文件
    let settings = Settings::load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&settings.logging); // _guard 不能丢

    info!("Starting Birkenbihl translation server");
    info!("LLM: {:?}", settings.llm);

    // B. 初始化模型后端与翻译服务
    let backend = GeminiBackend::new(&settings.gemini_config())
        .context("Failed to initialize Gemini backend")?;
    let translator = Translator::builder(Arc::new(backend))
        .with_pacing(settings.sentence_delay())
        .build();
    info!("Sentence pacing: {:?}", translator.pacing());

    // C. 路由
    let app = build_router(
        AppState::new(translator),
        Some(settings.server.static_dir.clone()),
    );

    // D. 启动服务，Ctrl+C 优雅停机
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Server shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("🛑 Ctrl+C received! Shutting down gracefully...");
}
