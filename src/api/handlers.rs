use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use crate::answer_engine::AnswerEngine;
use crate::data_models::Question;

use super::models::{AskResponse, StatusResponse};

pub const STATUS_MESSAGE: &str = "AI Search Agent is running 🚀";
pub const APOLOGY: &str = "AI brain crashed 😔 Try again in a moment";

pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    })
}

pub async fn ask_handler(
    State(answer_engine): State<Arc<AnswerEngine>>,
    Extension(question): Extension<Question>,
) -> Json<AskResponse> {
    match answer_engine.answer(&question).await {
        Ok(answer) => Json(answer.into()),
        Err(e) => {
            // clients get the same apology whatever failed
            tracing::warn!(provider = e.provider(), error = %e, "answer pipeline failed");
            Json(AskResponse {
                question: question.into_inner(),
                answer: APOLOGY.to_string(),
                sources: Vec::new(),
            })
        }
    }
}
