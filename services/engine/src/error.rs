use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use birken_core::BirkenError;
use serde_json::json;

/// HTTP 层错误：统一渲染成 `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub BirkenError);

impl From<BirkenError> for ApiError {
    fn from(err: BirkenError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BirkenError::MissingField(_) => StatusCode::BAD_REQUEST,
            BirkenError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: BirkenError) -> (StatusCode, Value) {
        let res = ApiError::from(err).into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = render(BirkenError::MissingField("text")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No text provided" }));
    }

    #[tokio::test]
    async fn parse_error_is_server_error() {
        let (status, body) = render(BirkenError::ParseError("eof".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error parsing response: eof" }));
    }
}
