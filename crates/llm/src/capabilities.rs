use crate::error::Result;
use async_trait::async_trait;

/// Maps a free-text question to one of the closed intent labels.
///
/// Implementations typically wrap the question in
/// [`crate::classification_prompt`] and send it to a model. They return the
/// raw label text; the service parses it fail-open, so a garbled answer or
/// an error costs the intent hint and nothing else.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, question: &str) -> Result<String>;
}

/// Writes the final natural-language answer from a system prompt and a
/// grounded user prompt. Errors here are surfaced to the caller; there is
/// no retry in the core.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}
