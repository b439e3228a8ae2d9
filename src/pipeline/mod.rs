//! Pipeline stages for plan-text-to-PDF rendering.
//!
//! Each submodule implements one step and is testable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! normalize ──▶ repair ──▶ layout ──▶ records ──▶ pdf
//!  (clean)     (defaults)  (pages)   (blocks)   (bytes)
//! ```
//!
//! 1. [`normalize`] — line cleaning, classification, stars, icons and the
//!    ASCII pass
//! 2. [`repair`]    — insert default lines for missing meals per day
//! 3. [`layout`]    — the page cursor; turns a plan into [`crate::output::Page`]s
//! 4. [`records`]   — fixed-stride hotel and restaurant blocks
//! 5. [`pdf`]       — serialise pages with base-14 fonts and link annotations
//!
//! [`wrap`] and [`metrics`] are shared helpers. [`llm`] is only used when
//! generating plans and is the sole stage with network I/O.

pub mod layout;
pub mod llm;
pub mod metrics;
pub mod normalize;
pub mod pdf;
pub mod records;
pub mod repair;
pub mod wrap;
