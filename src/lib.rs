//! # tripdoc
//!
//! Turn model-written travel plans into paginated PDF documents.
//!
//! A plan is three loosely formatted texts: a day-by-day itinerary plus
//! optional hotel and restaurant recommendations. Models rarely follow a
//! format exactly, so each text is cleaned, classified line by line and, for
//! the detailed profile, repaired before it is laid out onto fixed-size
//! pages with the 14 standard PDF fonts.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TravelPlan
//!  │
//!  ├─ 1. Normalize  strip Markdown, bullets, fences and chatty preambles
//!  ├─ 2. Repair     add missing breakfast / lunch / evening lines (detailed)
//!  ├─ 3. Layout     classify lines, wrap, paginate into draw operations
//!  ├─ 4. Records    chunk hotel (6 lines) and restaurant (4 lines) blocks
//!  └─ 5. PDF        serialise pages with pdf-writer, write atomically
//! ```
//!
//! Plans can also be produced end to end with [`generate_plan`], which asks
//! an LLM for each section through `edgequake-llm`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tripdoc::{render_to_file, RenderConfig, TravelPlan};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plan = TravelPlan::new("Lisbon", "Day 1\nMorning: Belem Tower\nAfternoon: Alfama walk")
//!         .with_restaurants("Time Out Market\nPortuguese\nFood hall.\nhttps://example.com");
//!     let doc = render_to_file(&plan, tripdoc::DEFAULT_OUTPUT_FILE, &RenderConfig::default())?;
//!     eprintln!("{} page(s)", doc.page_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tripdoc` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! tripdoc = { version = "0.1", default-features = false }
//! ```
//!
//! ## Layout Profiles
//!
//! | Profile | Intro line | Repair | Icons | Hotels / restaurants |
//! |---------|-----------|--------|-------|----------------------|
//! | `classic`  | yes | no  | no  | yes |
//! | `detailed` | no  | yes | yes | no  |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod progress;
pub mod prompts;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    GenerationConfig, GenerationConfigBuilder, LayoutProfile, PageGeometry, RenderConfig,
    RenderConfigBuilder, RepairPlacement,
};
pub use error::{RecordIssue, TripDocError};
pub use generate::{generate_plan, generate_plan_sync, resolve_writer, GeneratedPlan, GenerationStats};
pub use output::{Color, DrawOp, Font, Page, RenderStats, RenderedDocument, TextStyle};
pub use pipeline::llm::{Completion, PlanWriter};
pub use pipeline::records::RecordKind;
pub use pipeline::repair::{repair_plan, RepairOutcome};
pub use plan::{PlanRequest, PlanSection, TravelPlan};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
pub use render::{render, render_to_bytes, render_to_file};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "Travel_Plan.pdf";
