//! Plan generation entry points.
//!
//! Each section is one prompt and one completion, requested in order:
//! itinerary first, then restaurants and hotels when the request asks for
//! them and the layout profile can show them. Any failed section fails the
//! whole generation; nothing is retried.

use crate::config::{GenerationConfig, LayoutProfile, DEFAULT_MODEL};
use crate::error::TripDocError;
use crate::pipeline::llm::{PlanWriter, ProviderWriter};
use crate::pipeline::normalize::normalize_plan_text;
use crate::plan::{PlanRequest, PlanSection, TravelPlan};
use crate::prompts::{hotels_prompt, itinerary_prompt, restaurants_prompt};
use edgequake_llm::{LLMProvider, ProviderFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A generated plan plus what it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub plan: TravelPlan,
    pub stats: GenerationStats,
}

/// Token usage and timing for one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Sections requested from the model.
    pub sections: usize,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub duration_ms: u64,
}

/// Generate every section `request` asks for.
///
/// # Errors
/// - [`TripDocError::InvalidRequest`] when the request fails validation
/// - [`TripDocError::ProviderNotConfigured`] when no provider can be resolved
/// - [`TripDocError::LlmApiError`] / [`TripDocError::EmptyGeneration`] when a
///   section cannot be produced
pub async fn generate_plan(
    request: &PlanRequest,
    profile: LayoutProfile,
    config: &GenerationConfig,
) -> Result<GeneratedPlan, TripDocError> {
    let start = Instant::now();
    request.validate()?;
    let writer = resolve_writer(config)?;

    // ── Step 1: Work out which sections to request ───────────────────────
    let mut jobs: Vec<(PlanSection, String)> =
        vec![(PlanSection::Itinerary, itinerary_prompt(request, profile))];
    let wants_records = request.cuisines.is_some() || request.hotel_stars.is_some();
    if profile.rules().record_sections {
        if let Some(cuisines) = &request.cuisines {
            jobs.push((
                PlanSection::Restaurants,
                restaurants_prompt(&request.destination, cuisines),
            ));
        }
        if let Some(stars) = request.hotel_stars {
            jobs.push((PlanSection::Hotels, hotels_prompt(&request.destination, stars)));
        }
    } else if wants_records {
        warn!(
            "The {} profile has no hotel or restaurant sections; not requesting them",
            profile
        );
    }

    let total = jobs.len();
    info!(
        "Generating {} section(s) for a {}-day trip to {}",
        total,
        request.days,
        request.destination.trim()
    );
    if let Some(cb) = &config.progress_callback {
        cb.on_generation_start(total);
    }

    // ── Step 2: Request each section in turn ─────────────────────────────
    let mut plan = TravelPlan::new(request.destination.trim(), String::new());
    let mut stats = GenerationStats {
        sections: total,
        ..Default::default()
    };

    for (i, (section, prompt)) in jobs.iter().enumerate() {
        let index = i + 1;
        if let Some(cb) = &config.progress_callback {
            cb.on_section_start(*section, index, total);
        }

        let text = match request_section(writer.as_ref(), *section, prompt).await {
            Ok((text, completion_in, completion_out)) => {
                stats.total_input_tokens += completion_in as u64;
                stats.total_output_tokens += completion_out as u64;
                text
            }
            Err(e) => {
                if let Some(cb) = &config.progress_callback {
                    cb.on_section_error(*section, index, total, &e.to_string());
                }
                return Err(e);
            }
        };

        if let Some(cb) = &config.progress_callback {
            cb.on_section_complete(*section, index, total, text.len());
        }
        match section {
            PlanSection::Itinerary => plan.itinerary = text,
            PlanSection::Restaurants => plan.restaurants = Some(text),
            PlanSection::Hotels => plan.hotels = Some(text),
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Generation complete: {} section(s), {} input / {} output tokens, {}ms",
        total, stats.total_input_tokens, stats.total_output_tokens, stats.duration_ms
    );
    if let Some(cb) = &config.progress_callback {
        cb.on_generation_complete(total);
    }

    Ok(GeneratedPlan { plan, stats })
}

/// Synchronous wrapper around [`generate_plan`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_plan_sync(
    request: &PlanRequest,
    profile: LayoutProfile,
    config: &GenerationConfig,
) -> Result<GeneratedPlan, TripDocError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TripDocError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate_plan(request, profile, config))
}

/// Send one prompt and return the normalised text with its token counts.
async fn request_section(
    writer: &dyn PlanWriter,
    section: PlanSection,
    prompt: &str,
) -> Result<(String, usize, usize), TripDocError> {
    let completion = writer.write(section, prompt).await?;
    let text = normalize_plan_text(&completion.text);
    if text.trim().is_empty() {
        return Err(TripDocError::EmptyGeneration { section });
    }
    Ok((text, completion.input_tokens, completion.output_tokens))
}

// ── Provider resolution ──────────────────────────────────────────────────

/// Resolve the plan writer, from most-specific to least-specific.
///
/// 1. **Pre-built writer** (`config.writer`), used as-is.
/// 2. **Pre-built provider** (`config.provider`).
/// 3. **Named provider** (`config.provider_name`) with `config.model`.
/// 4. **Environment pair** (`TRIPDOC_LLM_PROVIDER` + `TRIPDOC_MODEL`), both
///    set and non-empty.
/// 5. **OpenAI** when `OPENAI_API_KEY` is set, even if other keys are too.
/// 6. **Full auto-detection** (`ProviderFactory::from_env`).
pub fn resolve_writer(config: &GenerationConfig) -> Result<Arc<dyn PlanWriter>, TripDocError> {
    if let Some(writer) = &config.writer {
        return Ok(Arc::clone(writer));
    }
    let provider = resolve_provider(config)?;
    Ok(Arc::new(ProviderWriter::new(provider, config)))
}

fn resolve_provider(config: &GenerationConfig) -> Result<Arc<dyn LLMProvider>, TripDocError> {
    if let Some(provider) = &config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(name) = &config.provider_name {
        return create_provider(name, &config.model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("TRIPDOC_LLM_PROVIDER"),
        std::env::var("TRIPDOC_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_provider("openai", &config.model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| TripDocError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY (default model {DEFAULT_MODEL}), ANTHROPIC_API_KEY, \
                or configure a provider.\n\
                Error: {e}"
            ),
        })?;

    Ok(llm_provider)
}

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, TripDocError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        TripDocError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::llm::Completion;
    use futures::future::BoxFuture;

    struct EchoWriter;

    impl PlanWriter for EchoWriter {
        fn write<'a>(
            &'a self,
            section: PlanSection,
            _prompt: &'a str,
        ) -> BoxFuture<'a, Result<Completion, TripDocError>> {
            Box::pin(async move {
                Ok(Completion {
                    text: format!("Day 1\n{section}"),
                    input_tokens: 10,
                    output_tokens: 5,
                })
            })
        }
    }

    #[test]
    fn explicit_writer_wins() {
        let config = GenerationConfig::builder()
            .writer(Arc::new(EchoWriter))
            .build()
            .unwrap();
        let writer = resolve_writer(&config).unwrap();
        let reply = tokio_test::block_on(writer.write(PlanSection::Itinerary, "prompt")).unwrap();
        assert_eq!(reply.text, "Day 1\nitinerary");
    }

    #[tokio::test]
    async fn invalid_request_fails_before_any_call() {
        let config = GenerationConfig::builder()
            .writer(Arc::new(EchoWriter))
            .build()
            .unwrap();
        let request = PlanRequest::new("Paris", 0, "art", "slow");
        let err = generate_plan(&request, LayoutProfile::Classic, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, TripDocError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn sums_tokens_across_sections() {
        let config = GenerationConfig::builder()
            .writer(Arc::new(EchoWriter))
            .build()
            .unwrap();
        let request = PlanRequest::new("Paris", 2, "art", "slow")
            .hotel_stars(3)
            .cuisines("French");
        let out = generate_plan(&request, LayoutProfile::Classic, &config)
            .await
            .unwrap();
        assert_eq!(out.stats.sections, 3);
        assert_eq!(out.stats.total_input_tokens, 30);
        assert_eq!(out.stats.total_output_tokens, 15);
        assert_eq!(out.plan.hotels.as_deref(), Some("Day 1\nhotel recommendations"));
    }
}
