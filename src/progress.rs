//! Progress-callback trait for per-section generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GenerationConfigBuilder::progress_callback`] to receive
//! events as each plan section is requested from the model.
//!
//! # Example
//!
//! ```rust
//! use tripdoc::{GenerationConfig, GenerationProgressCallback, PlanSection};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for CountingCallback {
//!     fn on_section_complete(&self, section: PlanSection, index: usize, total: usize, text_len: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{section} ({index}/{total}) done, {text_len} bytes");
//!     }
//! }
//!
//! let config = GenerationConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { completed: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::plan::PlanSection;
use std::sync::Arc;

/// Called by [`crate::generate::generate_plan`] around each section request.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Sections are generated one after another, so calls
/// never overlap.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once before the first request.
    ///
    /// # Arguments
    /// * `total_sections` — number of sections that will be requested
    fn on_generation_start(&self, total_sections: usize) {
        let _ = total_sections;
    }

    /// Called just before a section's prompt is sent.
    ///
    /// # Arguments
    /// * `section` — which section
    /// * `index`   — 1-indexed position in the request order
    /// * `total`   — total sections
    fn on_section_start(&self, section: PlanSection, index: usize, total: usize) {
        let _ = (section, index, total);
    }

    /// Called when a section comes back non-empty.
    ///
    /// # Arguments
    /// * `text_len` — byte length of the normalised reply
    fn on_section_complete(&self, section: PlanSection, index: usize, total: usize, text_len: usize) {
        let _ = (section, index, total, text_len);
    }

    /// Called when a section fails. Generation stops after this.
    fn on_section_error(&self, section: PlanSection, index: usize, total: usize, error: &str) {
        let _ = (section, index, total, error);
    }

    /// Called once after every section succeeded.
    fn on_generation_complete(&self, total_sections: usize) {
        let _ = total_sections;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GenerationConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;
