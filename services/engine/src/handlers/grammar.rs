use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use birken_core::{BirkenError, GrammarExplanation, GrammarRequest};

use crate::error::ApiError;
use crate::state::SharedState;

/// `POST /grammar-explanation`
pub async fn grammar_explanation(
    State(state): State<SharedState>,
    body: Result<Json<GrammarRequest>, JsonRejection>,
) -> Result<Json<GrammarExplanation>, ApiError> {
    let Ok(Json(req)) = body else {
        return Err(BirkenError::MissingField("sentence").into());
    };
    let sentence = req.sentence.ok_or(BirkenError::MissingField("sentence"))?;

    let explanation = state
        .translator
        .explain_grammar(&sentence, &req.source_lang, &req.target_lang)
        .await;
    Ok(Json(explanation))
}
