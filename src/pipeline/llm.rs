//! LLM interaction: send one section prompt and return the model's text.
//!
//! Generation goes through the [`PlanWriter`] trait so callers (and tests)
//! can swap the provider-backed [`ProviderWriter`] for anything that turns a
//! prompt into text. Prompt wording lives in [`crate::prompts`].
//!
//! There is no retry here: a failed call fails the section, and the caller
//! decides whether to try again.

use crate::config::GenerationConfig;
use crate::error::TripDocError;
use crate::plan::PlanSection;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// One model reply plus its token usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
}

/// Anything that can answer a section prompt with plain text.
pub trait PlanWriter: Send + Sync {
    fn write<'a>(
        &'a self,
        section: PlanSection,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<Completion, TripDocError>>;
}

/// [`PlanWriter`] backed by an `edgequake-llm` provider.
pub struct ProviderWriter {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
}

impl ProviderWriter {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &GenerationConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
        }
    }
}

impl PlanWriter for ProviderWriter {
    fn write<'a>(
        &'a self,
        section: PlanSection,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<Completion, TripDocError>> {
        Box::pin(async move {
            let start = Instant::now();
            let messages = vec![ChatMessage::user(prompt)];
            let response = self
                .provider
                .chat(&messages, Some(&self.options))
                .await
                .map_err(|e| TripDocError::LlmApiError {
                    section,
                    message: e.to_string(),
                })?;
            debug!(
                "{}: {} input tokens, {} output tokens, {:?}",
                section,
                response.prompt_tokens,
                response.completion_tokens,
                start.elapsed()
            );
            Ok(Completion {
                text: response.content,
                input_tokens: response.prompt_tokens,
                output_tokens: response.completion_tokens,
            })
        })
    }
}

/// Build `CompletionOptions` from the generation config.
fn build_options(config: &GenerationConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}
