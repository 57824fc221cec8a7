//! # Assistant LLM
//!
//! The question-answering pipeline on top of the hybrid retriever.
//!
//! The language-model calls themselves are capabilities implemented outside
//! this workspace: [`IntentClassifier`] labels the question,
//! [`AnswerGenerator`] writes the final answer. This crate owns the prompts,
//! the fail-open handling of classifier output, and the order of operations:
//! classify, retrieve, short-circuit on an empty result, build a grounded
//! prompt, generate.

mod capabilities;
mod error;
mod prompts;
mod service;

pub use capabilities::{AnswerGenerator, IntentClassifier};
pub use error::{LlmError, Result};
pub use prompts::{
    answer_prompt, build_context, classification_prompt, ANSWER_SYSTEM_PROMPT,
    CLASSIFIER_SYSTEM_PROMPT, NO_RESULTS_MESSAGE,
};
pub use service::AssistantService;
