use serde::{Deserialize, Serialize};

use crate::data_models::{Answer, Source};

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        AskResponse {
            question: answer.question,
            answer: answer.answer,
            sources: answer.sources,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
