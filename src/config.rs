//! Configuration types for rendering and generating travel plans.
//!
//! Rendering is controlled through [`RenderConfig`] and generation through
//! [`GenerationConfig`]. Both are built via builders that validate on
//! [`build`](RenderConfigBuilder::build), so an invalid geometry or an empty
//! title is rejected before any page is laid out.

use crate::error::TripDocError;
use crate::pipeline::llm::PlanWriter;
use crate::pipeline::normalize::{TimeLabel, CLASSIC_VOCABULARY, DETAILED_VOCABULARY};
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

// ── Rendering ────────────────────────────────────────────────────────────

/// Configuration for laying out and writing one document.
///
/// # Example
/// ```rust
/// use tripdoc::{LayoutProfile, RenderConfig, RepairPlacement};
///
/// let config = RenderConfig::builder()
///     .profile(LayoutProfile::Detailed)
///     .repair_placement(RepairPlacement::Chronological)
///     .build()
///     .unwrap();
/// assert!(config.profile.rules().repair);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Which set of layout rules to apply. Default: [`LayoutProfile::Classic`].
    pub profile: LayoutProfile,

    /// Where synthesized day parts go when repairing an itinerary.
    /// Only used by profiles that repair. Default: [`RepairPlacement::Append`].
    pub repair_placement: RepairPlacement,

    /// Prefix recognised time headings with an emoji. Default: true.
    ///
    /// Only profiles with icon support honour this. The standard PDF fonts
    /// cannot draw emoji, so icons survive only into the page model and only
    /// when [`keep_unicode`](Self::keep_unicode) is set.
    pub heading_icons: bool,

    /// Skip the ASCII-only pass of profiles that apply one. Default: false.
    pub keep_unicode: bool,

    /// Page size and margins.
    pub geometry: PageGeometry,

    /// Centred document title. Default: "Travel Plan".
    pub title: String,

    /// Heading printed above the itinerary. Default: "Travel Itinerary".
    pub itinerary_heading: String,

    /// Flate-compress page content streams. Default: true.
    pub compress_streams: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            profile: LayoutProfile::default(),
            repair_placement: RepairPlacement::default(),
            heading_icons: true,
            keep_unicode: false,
            geometry: PageGeometry::default(),
            title: "Travel Plan".to_string(),
            itinerary_heading: "Travel Itinerary".to_string(),
            compress_streams: true,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }

    /// Whether time headings get an icon under this configuration.
    pub fn icons_enabled(&self) -> bool {
        self.profile.rules().icons && self.heading_icons
    }

    /// Whether body text is reduced to ASCII under this configuration.
    pub fn ascii_only(&self) -> bool {
        self.profile.rules().ascii_only && !self.keep_unicode
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn profile(mut self, profile: LayoutProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn repair_placement(mut self, placement: RepairPlacement) -> Self {
        self.config.repair_placement = placement;
        self
    }

    pub fn heading_icons(mut self, v: bool) -> Self {
        self.config.heading_icons = v;
        self
    }

    pub fn keep_unicode(mut self, v: bool) -> Self {
        self.config.keep_unicode = v;
        self
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn itinerary_heading(mut self, heading: impl Into<String>) -> Self {
        self.config.itinerary_heading = heading.into();
        self
    }

    pub fn compress_streams(mut self, v: bool) -> Self {
        self.config.compress_streams = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, TripDocError> {
        let c = &self.config;
        let g = &c.geometry;
        if g.printable_width() <= 0.0 {
            return Err(TripDocError::InvalidConfig(format!(
                "margins {} + {} leave no printable width on a {}pt page",
                g.margin_left, g.margin_right, g.width
            )));
        }
        if g.top() <= g.bottom_margin {
            return Err(TripDocError::InvalidConfig(format!(
                "top margin {} leaves no printable height on a {}pt page",
                g.top_margin, g.height
            )));
        }
        if c.title.trim().is_empty() {
            return Err(TripDocError::InvalidConfig("title must not be empty".into()));
        }
        Ok(self.config)
    }
}

/// Page size and margins in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Distance from the top edge to the first baseline.
    pub top_margin: f32,
    /// Hard floor: lines inside a record block never go below this.
    pub bottom_margin: f32,
}

impl Default for PageGeometry {
    /// US Letter.
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 50.0,
            margin_right: 50.0,
            top_margin: 60.0,
            bottom_margin: 40.0,
        }
    }
}

impl PageGeometry {
    pub fn left(&self) -> f32 {
        self.margin_left
    }

    pub fn right(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Baseline of the first line on a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.top_margin
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn printable_width(&self) -> f32 {
        self.right() - self.left()
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The two layout variants.
///
/// | Rule                     | Classic                 | Detailed               |
/// |--------------------------|-------------------------|------------------------|
/// | Time headings            | morning/afternoon/evening | + breakfast/lunch/dinner |
/// | Intro line               | styled once             | plain                  |
/// | Day repair               | no                      | yes                    |
/// | Split `a - b` bullets    | no                      | yes                    |
/// | Heading icons            | no                      | yes                    |
/// | ASCII-only text          | no                      | yes                    |
/// | Body wrap                | 90 cols (intro 85)      | 70 cols                |
/// | Hotels / restaurants     | yes                     | no                     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutProfile {
    #[default]
    Classic,
    Detailed,
}

/// Concrete rule set behind a [`LayoutProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRules {
    pub vocabulary: &'static [TimeLabel],
    pub intro: bool,
    pub repair: bool,
    pub split_bullets: bool,
    /// Drop leading `-`/`•` from time headings before drawing them.
    pub strip_heading_bullets: bool,
    pub icons: bool,
    pub ascii_only: bool,
    pub intro_wrap: usize,
    pub body_wrap: usize,
    /// `None` draws time headings on one line without wrapping.
    pub heading_wrap: Option<usize>,
    pub body_indent: f32,
    pub time_heading_advance: f32,
    pub record_sections: bool,
}

impl LayoutProfile {
    pub const fn rules(self) -> LayoutRules {
        match self {
            LayoutProfile::Classic => LayoutRules {
                vocabulary: CLASSIC_VOCABULARY,
                intro: true,
                repair: false,
                split_bullets: false,
                strip_heading_bullets: false,
                icons: false,
                ascii_only: false,
                intro_wrap: 85,
                body_wrap: 90,
                heading_wrap: None,
                body_indent: 20.0,
                time_heading_advance: 16.0,
                record_sections: true,
            },
            LayoutProfile::Detailed => LayoutRules {
                vocabulary: DETAILED_VOCABULARY,
                intro: false,
                repair: true,
                split_bullets: true,
                strip_heading_bullets: true,
                icons: true,
                ascii_only: true,
                intro_wrap: 85,
                body_wrap: 70,
                heading_wrap: Some(70),
                body_indent: 25.0,
                time_heading_advance: 14.0,
                record_sections: false,
            },
        }
    }
}

impl fmt::Display for LayoutProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutProfile::Classic => "classic",
            LayoutProfile::Detailed => "detailed",
        })
    }
}

/// Where the section repairer puts synthesized day parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPlacement {
    /// After the day's last non-blank line, breakfast → lunch → evening.
    #[default]
    Append,
    /// Before the first later day-part heading of the same day.
    Chronological,
}

// ── Generation ───────────────────────────────────────────────────────────

/// Configuration for generating plan text with an LLM.
///
/// Built via [`GenerationConfig::builder()`] or [`GenerationConfig::default()`].
#[derive(Clone)]
pub struct GenerationConfig {
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the environment decides.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Pre-constructed plan writer. Takes precedence over everything else.
    pub writer: Option<Arc<dyn PlanWriter>>,

    /// Sampling temperature. Default: 0.7.
    pub temperature: f32,

    /// Maximum tokens per section reply. Default: 2048.
    pub max_tokens: usize,

    /// Optional callback for per-section progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            provider_name: None,
            provider: None,
            writer: None,
            temperature: 0.7,
            max_tokens: 2048,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("writer", &self.writer.as_ref().map(|_| "<dyn PlanWriter>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn writer(mut self, writer: Arc<dyn PlanWriter>) -> Self {
        self.config.writer = Some(writer);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, TripDocError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(TripDocError::InvalidConfig("model must not be empty".into()));
        }
        if c.max_tokens == 0 {
            return Err(TripDocError::InvalidConfig("max_tokens must be ≥ 1".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_render_config_is_letter_classic() {
        let c = RenderConfig::default();
        assert_eq!(c.profile, LayoutProfile::Classic);
        assert_eq!(c.geometry.top(), 732.0);
        assert_eq!(c.geometry.right(), 562.0);
        assert!(!c.icons_enabled());
        assert!(!c.ascii_only());
    }

    #[test]
    fn detailed_profile_switches_rules() {
        let c = RenderConfig::builder()
            .profile(LayoutProfile::Detailed)
            .build()
            .unwrap();
        assert!(c.icons_enabled());
        assert!(c.ascii_only());
        let rules = c.profile.rules();
        assert!(rules.repair && rules.split_bullets && !rules.intro);
        assert_eq!(rules.body_wrap, 70);
    }

    #[test]
    fn keep_unicode_and_no_icons() {
        let c = RenderConfig::builder()
            .profile(LayoutProfile::Detailed)
            .heading_icons(false)
            .keep_unicode(true)
            .build()
            .unwrap();
        assert!(!c.icons_enabled());
        assert!(!c.ascii_only());
    }

    #[test]
    fn rejects_margins_wider_than_page() {
        let geometry = PageGeometry {
            margin_left: 400.0,
            margin_right: 300.0,
            ..PageGeometry::default()
        };
        let err = RenderConfig::builder().geometry(geometry).build().unwrap_err();
        assert!(matches!(err, TripDocError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_blank_title() {
        assert!(RenderConfig::builder().title("  ").build().is_err());
    }

    #[test]
    fn generation_defaults_and_clamping() {
        let c = GenerationConfig::builder().temperature(5.0).build().unwrap();
        assert_eq!(c.model, "gpt-4o-mini");
        assert_eq!(c.temperature, 2.0);
        assert_eq!(c.max_tokens, 2048);
        assert!(GenerationConfig::builder().max_tokens(0).build().is_err());
    }

    #[test]
    fn generation_debug_hides_provider() {
        let dbg = format!("{:?}", GenerationConfig::default());
        assert!(dbg.contains("gpt-4o-mini"));
        assert!(dbg.contains("provider: None"));
    }

    #[test]
    fn profile_serde_is_snake_case() {
        let json = serde_json::to_string(&LayoutProfile::Detailed).unwrap();
        assert_eq!(json, "\"detailed\"");
        let placement: RepairPlacement = serde_json::from_str("\"chronological\"").unwrap();
        assert_eq!(placement, RepairPlacement::Chronological);
    }
}
