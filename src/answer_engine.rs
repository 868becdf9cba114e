use std::fmt::Write;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_MODEL};
use crate::data_models::{Answer, Question, SearchResult, Source};
use crate::errors::ProviderError;
use crate::llm::{ChatMessage, LlmProvider};
use crate::search::SearchProvider;

pub const MAX_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub model: String,
    pub max_results: usize,
    pub provider_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            model: DEFAULT_MODEL.to_string(),
            max_results: MAX_RESULTS,
            provider_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        EngineSettings {
            model: config.model.clone(),
            max_results: MAX_RESULTS,
            provider_timeout: config.provider_timeout,
        }
    }
}

/// Searches the web for a question and asks the model to summarize what it found.
pub struct AnswerEngine {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn LlmProvider>,
    settings: EngineSettings,
}

impl AnswerEngine {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            search,
            llm,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Run the pipeline: one search call, then one completion call.
    ///
    /// The completion is never requested when the search fails.
    pub async fn answer(&self, question: &Question) -> Result<Answer, ProviderError> {
        let results = with_timeout(
            self.search.name(),
            self.settings.provider_timeout,
            self.search
                .search(question.as_str(), self.settings.max_results),
        )
        .await?;

        let prompt = build_prompt(question.as_str(), &results);
        let messages = [ChatMessage::user(prompt)];

        let completion = with_timeout(
            self.llm.name(),
            self.settings.provider_timeout,
            self.llm.complete(&self.settings.model, &messages),
        )
        .await?;

        Ok(Answer {
            question: question.as_str().to_string(),
            answer: completion.trim().to_string(),
            sources: results.iter().map(Source::from).collect(),
        })
    }
}

async fn with_timeout<T>(
    provider: &'static str,
    timeout: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(res) => res,
        Err(_) => Err(ProviderError::Timeout { provider, timeout }),
    }
}

/// Build the summarization prompt from the question and the search results.
pub fn build_prompt(question: &str, results: &[SearchResult]) -> String {
    let mut context = String::new();
    for (idx, result) in results.iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(
            context,
            "[{}] {}\n{}\n",
            idx + 1,
            result.title.trim(),
            result.content.trim()
        );
    }
    if context.is_empty() {
        context.push_str("No search results were found.\n");
    }

    format!(
        "Answer clearly in numbered points.

Rules:
- No markdown
- No symbols like *, +, or #
- Each point max 1 line
- Only 5 points
- Do not mention sources
- Simple human language

Question:
{question}

Data:
{context}
Output format:
1. ...
2. ...
3. ...
4. ...
5. ...
"
    )
}

#[test]
fn test_build_prompt_embeds_question_titles_and_content() {
    let results = vec![
        SearchResult::new("Tokio docs", "https://tokio.rs", "  An async runtime.  "),
        SearchResult::new("Axum", "https://docs.rs/axum", "Web framework."),
    ];
    let prompt = build_prompt("What is tokio?", &results);

    assert!(prompt.contains("Question:\nWhat is tokio?\n"));
    assert!(prompt.contains("[1] Tokio docs\nAn async runtime.\n"));
    assert!(prompt.contains("[2] Axum\nWeb framework.\n"));
    assert!(prompt.contains("Only 5 points"));
    assert!(prompt.contains("Do not mention sources"));
    assert!(prompt.contains("No markdown"));
    assert!(prompt.trim_end().ends_with("5. ..."));
    // urls are cited separately, the model never sees them
    assert!(!prompt.contains("https://tokio.rs"));
}

#[test]
fn test_build_prompt_without_results() {
    let prompt = build_prompt("anything at all", &[]);
    assert!(prompt.contains("Data:\nNo search results were found.\n"));
}
