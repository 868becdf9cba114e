#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use asker::answer_engine::{AnswerEngine, EngineSettings};
use asker::data_models::SearchResult;
use asker::errors::ProviderError;
use asker::llm::{ChatMessage, LlmProvider};
use asker::search::SearchProvider;

/// Ordered record of provider calls shared between the doubles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search { query: String, max_results: usize },
    Complete { model: String, prompt: String },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct MockSearch {
    pub log: CallLog,
    pub outcome: Result<Vec<SearchResult>, &'static str>,
    pub delay: Option<Duration>,
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        self.log.lock().unwrap().push(Call::Search {
            query: query.to_string(),
            max_results,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(|message| ProviderError::Http {
            provider: "mock-search",
            message: message.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "mock-search"
    }
}

pub struct MockLlm {
    pub log: CallLog,
    pub outcome: Result<String, &'static str>,
    pub delay: Option<Duration>,
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, ProviderError> {
        let prompt = messages
            .iter()
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        self.log.lock().unwrap().push(Call::Complete {
            model: model.to_string(),
            prompt,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(|message| ProviderError::Malformed {
            provider: "mock-llm",
            message: message.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "mock-llm"
    }
}

pub fn two_results() -> Vec<SearchResult> {
    vec![
        SearchResult::new(
            "The Rust Book",
            "https://doc.rust-lang.org/book/",
            "Ownership is Rust's most unique feature.",
        ),
        SearchResult::new(
            "Rust by Example",
            "https://doc.rust-lang.org/rust-by-example/",
            "Borrowing lets you reference data without taking ownership.",
        ),
    ]
}

pub const FIVE_LINES: &str = "1. One\n2. Two\n3. Three\n4. Four\n5. Five";

pub fn engine(
    log: &CallLog,
    search: Result<Vec<SearchResult>, &'static str>,
    completion: Result<String, &'static str>,
) -> AnswerEngine {
    engine_with(log, search, completion, EngineSettings::default(), None)
}

pub fn engine_with(
    log: &CallLog,
    search: Result<Vec<SearchResult>, &'static str>,
    completion: Result<String, &'static str>,
    settings: EngineSettings,
    llm_delay: Option<Duration>,
) -> AnswerEngine {
    AnswerEngine::new(
        Arc::new(MockSearch {
            log: log.clone(),
            outcome: search,
            delay: None,
        }),
        Arc::new(MockLlm {
            log: log.clone(),
            outcome: completion,
            delay: llm_delay,
        }),
        settings,
    )
}
