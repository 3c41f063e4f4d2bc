//! 整段文本 -> 逐句 Birkenbihl 翻译 (NDJSON 流)

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use birken_core::{BirkenError, ProcessRequest};
use futures::StreamExt;

use crate::error::ApiError;
use crate::state::SharedState;

/// `POST /process`
///
/// 每翻译完一句就写出一行 JSON，客户端按行读取。
/// 客户端断开后流被丢弃，剩余句子不再请求模型。
pub async fn process_text(
    State(state): State<SharedState>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Rejected /process body: {}", rejection.body_text());
            return Err(BirkenError::MissingField("text").into());
        }
    };
    let text = req.text.ok_or(BirkenError::MissingField("text"))?;

    let lines = state
        .translator
        .translate_text(&text, req.source_lang, req.target_lang)
        .map(|translation| {
            let mut line = serde_json::to_vec(&translation)?;
            line.push(b'\n');
            Ok::<_, serde_json::Error>(line)
        });

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(lines),
    )
        .into_response())
}
