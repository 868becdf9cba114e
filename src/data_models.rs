use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const MIN_QUESTION_CHARS: usize = 3;

/// A question that passed validation.
///
/// Holds the caller's original text; only the length check looks at the
/// trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn parse(raw: String) -> Result<Question, ValidationError> {
        if raw.trim().chars().count() < MIN_QUESTION_CHARS {
            return Err(ValidationError::QuestionTooShort);
        }
        Ok(Question(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub url: String,
}

impl From<&SearchResult> for Source {
    fn from(result: &SearchResult) -> Self {
        Source {
            title: result.title.clone(),
            url: result.url.clone(),
        }
    }
}

/// Successful outcome of the search + summarize pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
}
