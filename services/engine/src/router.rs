//! Axum router: URL 到 handler 的映射

use axum::body::Body;
use axum::http::Request;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::handlers::{grammar::grammar_explanation, process::process_text, system::health};
use crate::state::{AppState, SharedState};

/// 构建完整的路由
///
/// `static_dir` 存在时作为兜底服务挂载，`GET /` 返回其中的 index.html。
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let shared: SharedState = Arc::new(state);

    let mut router = Router::new()
        .route("/process", post(process_text))
        .route("/grammar-explanation", post(grammar_explanation))
        .route("/health", get(health));

    if let Some(dir) = static_dir.filter(|d| d.is_dir()) {
        tracing::info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        // 每个请求一个 trace_id，流式响应的日志也挂在这个 span 下
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "http",
                method = %req.method(),
                uri = %req.uri(),
                trace_id = %Uuid::new_v4(),
            )
        }))
        .with_state(shared)
}
