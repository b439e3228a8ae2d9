//! Layout engine: place a [`TravelPlan`] onto fixed-size pages.
//!
//! All mutable drawing state (the page list, the vertical cursor and the
//! current text style) lives in a [`RenderContext`] owned by one
//! [`layout_document`] call. Coordinates are PDF points with the origin at the
//! bottom-left, so the cursor starts near the top of the page and moves down.
//!
//! ## Document order
//!
//! ```text
//! title block ─▶ itinerary ─▶ [restaurants page(s)] ─▶ [hotels page(s)]
//! ```
//!
//! Every unit (a wrapped line, a heading, a record block) first checks the
//! cursor against its section's low-water mark and starts a new page when the
//! cursor has dropped below it.

use crate::config::{LayoutRules, PageGeometry, RenderConfig};
use crate::error::{RecordIssue, TripDocError};
use crate::output::{Color, DrawOp, Font, Page, RenderStats, RenderedDocument, TextStyle};
use crate::pipeline::metrics::text_width;
use crate::pipeline::normalize::{
    ascii_safe, clean_line, iconize, split_bullets, strip_bullet_markers, LineClass,
    LineClassifier,
};
use crate::pipeline::records::{chunk_records, RecordKind};
use crate::pipeline::repair::repair_plan;
use crate::pipeline::wrap::wrap;
use crate::plan::TravelPlan;
use tracing::{debug, warn};

/// Itinerary lines start a new page below this height.
pub const ITINERARY_LOW_WATER: f32 = 120.0;

const TITLE: TextStyle = TextStyle::new(Font::HelveticaBold, 24.0);
const DESTINATION: TextStyle = TextStyle::new(Font::Helvetica, 16.0);
const SECTION_HEADING: TextStyle = TextStyle::new(Font::HelveticaBold, 18.0);
const RECORD_SECTION_HEADING: TextStyle = TextStyle::new(Font::HelveticaBold, 20.0);
const INTRO: TextStyle = TextStyle::new(Font::HelveticaBold, 13.0).with_color(Color::DARK_GREEN);
const DAY_HEADING: TextStyle = TextStyle::new(Font::HelveticaBold, 16.0).with_color(Color::GREY);
const TIME_HEADING: TextStyle = TextStyle::new(Font::HelveticaBold, 12.0);
pub(crate) const BODY: TextStyle = TextStyle::new(Font::Helvetica, 11.0);

// ── Render context ───────────────────────────────────────────────────────

/// Page list, cursor and current style for one document.
#[derive(Debug)]
pub struct RenderContext<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    y: f32,
    style: TextStyle,
}

impl<'g> RenderContext<'g> {
    /// Start a document with one empty page and the cursor at the top margin.
    pub fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::new(1)],
            y: geometry.top(),
            style: BODY,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.geometry
    }

    /// Current baseline.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Begin a fresh page with the cursor at the top margin.
    ///
    /// The current style carries over, so a run wrapped inside
    /// [`with_style`](Self::with_style) keeps its style across the break.
    pub fn start_page(&mut self) {
        let number = self.pages.len() + 1;
        debug!("Starting page {}", number);
        self.pages.push(Page::new(number));
        self.y = self.geometry.top();
    }

    /// Start a new page if the cursor is below `low_water`.
    pub fn ensure_room(&mut self, low_water: f32) {
        if self.y < low_water {
            self.start_page();
        }
    }

    /// Move the cursor down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Run `f` with `style` as the current style, then restore the previous one.
    pub fn with_style<R>(&mut self, style: TextStyle, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.style, style);
        let result = f(self);
        self.style = saved;
        result
    }

    /// Draw `text` at `x` on the current baseline. Empty text draws nothing.
    pub fn text(&mut self, x: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let op = DrawOp::Text {
            x,
            y: self.y,
            text: text.to_string(),
            style: self.style,
        };
        self.push(op);
    }

    /// Draw `text` centred on the page.
    pub fn centered(&mut self, text: &str) {
        let width = text_width(text, self.style.font, self.style.size);
        let x = self.geometry.center_x() - width / 2.0;
        self.text(x, text);
    }

    /// Horizontal rule across the printable width at the cursor.
    pub fn rule(&mut self) {
        let op = DrawOp::Rule {
            x1: self.geometry.left(),
            x2: self.geometry.right(),
            y: self.y,
        };
        self.push(op);
    }

    /// Draw `url` in blue at `x` and make its drawn bounds clickable.
    pub fn link(&mut self, x: f32, url: &str) {
        let style = self.style.with_color(Color::BLUE);
        self.with_style(style, |ctx| {
            ctx.text(x, url);
            let width = text_width(url, style.font, style.size);
            let x2 = (x + width).min(ctx.geometry.right()).max(x);
            let rect = [x, ctx.y - 2.0, x2, ctx.y + 10.0];
            ctx.push(DrawOp::Link {
                rect,
                url: url.to_string(),
            });
        });
    }

    /// Draw wrapped lines at `x`, checking `low_water` before each line.
    /// Returns the number of lines drawn.
    pub fn wrapped(&mut self, x: f32, lines: &[String], step: f32, low_water: f32) -> usize {
        for line in lines {
            self.ensure_room(low_water);
            self.text(x, line);
            self.advance(step);
        }
        lines.len()
    }

    /// Consume the context, returning its pages.
    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}

// ── Document ─────────────────────────────────────────────────────────────

/// Lay out a whole plan.
///
/// # Errors
/// [`TripDocError::EmptyDestination`] when the destination is blank.
pub fn layout_document(
    plan: &TravelPlan,
    config: &RenderConfig,
) -> Result<RenderedDocument, TripDocError> {
    let destination = plan.destination.trim();
    if destination.is_empty() {
        return Err(TripDocError::EmptyDestination);
    }

    let rules = config.profile.rules();
    let mut ctx = RenderContext::new(&config.geometry);
    let mut stats = RenderStats::default();
    let mut issues = Vec::new();

    draw_title_block(&mut ctx, config, destination);

    let repaired;
    let itinerary = if rules.repair {
        let outcome = repair_plan(&plan.itinerary, config.repair_placement);
        debug!(
            "Repaired {} day(s), synthesized {} line(s)",
            outcome.days, outcome.synthesized
        );
        stats.synthesized_lines = outcome.synthesized;
        repaired = outcome.text;
        repaired.as_str()
    } else {
        plan.itinerary.as_str()
    };
    draw_itinerary(&mut ctx, config, &rules, itinerary, &mut stats);

    for kind in RecordKind::SECTION_ORDER {
        let Some(body) = plan.section(kind.section()) else {
            continue;
        };
        if !rules.record_sections {
            warn!(
                "The {} profile has no {} section; skipping it",
                config.profile,
                kind.section()
            );
            continue;
        }
        draw_record_section(&mut ctx, kind, body, &mut stats, &mut issues);
    }

    let pages = ctx.finish();
    stats.pages = pages.len();
    Ok(RenderedDocument {
        title: config.title.clone(),
        destination: destination.to_string(),
        pages,
        stats,
        issues,
    })
}

fn draw_title_block(ctx: &mut RenderContext<'_>, config: &RenderConfig, destination: &str) {
    ctx.with_style(TITLE, |ctx| ctx.centered(&config.title));
    ctx.advance(30.0);
    ctx.with_style(DESTINATION, |ctx| ctx.centered(destination));
    ctx.advance(30.0);
    ctx.rule();
    ctx.advance(35.0);
    let left = ctx.geometry().left();
    ctx.with_style(SECTION_HEADING, |ctx| ctx.text(left, &config.itinerary_heading));
    ctx.advance(25.0);
}

fn draw_itinerary(
    ctx: &mut RenderContext<'_>,
    config: &RenderConfig,
    rules: &LayoutRules,
    text: &str,
    stats: &mut RenderStats,
) {
    let left = ctx.geometry().left();
    let ascii = config.ascii_only();
    let mut classifier = LineClassifier::new(rules.vocabulary, rules.intro);

    for raw in text.split('\n') {
        let line = clean_line(raw);

        match classifier.classify(&line) {
            LineClass::DayHeading => {
                let heading = if ascii { ascii_safe(&line) } else { line };
                ctx.ensure_room(ITINERARY_LOW_WATER);
                ctx.with_style(DAY_HEADING, |ctx| ctx.text(left, &heading));
                ctx.advance(10.0);
                ctx.rule();
                ctx.advance(20.0);
                stats.day_headings += 1;
            }
            LineClass::Intro => {
                let lines = wrap(&line, rules.intro_wrap);
                stats.body_lines += ctx.with_style(INTRO, |ctx| {
                    ctx.wrapped(left + 20.0, &lines, 16.0, ITINERARY_LOW_WATER)
                });
                ctx.advance(14.0);
            }
            _ if rules.split_bullets => {
                for logical in split_bullets(&line) {
                    draw_body_line(ctx, config, rules, &mut classifier, &logical, stats);
                }
            }
            _ => draw_body_line(ctx, config, rules, &mut classifier, &line, stats),
        }
    }
}

/// Draw one logical (already split) itinerary line as a time heading or body.
fn draw_body_line(
    ctx: &mut RenderContext<'_>,
    config: &RenderConfig,
    rules: &LayoutRules,
    classifier: &mut LineClassifier,
    line: &str,
    stats: &mut RenderStats,
) {
    let left = ctx.geometry().left();
    let ascii = config.ascii_only();

    if let LineClass::TimeHeading(_) = classifier.classify(line) {
        let mut heading = if rules.strip_heading_bullets {
            strip_bullet_markers(line).to_string()
        } else {
            line.to_string()
        };
        if config.icons_enabled() {
            heading = iconize(&heading).into_owned();
        }
        if ascii {
            heading = ascii_safe(&heading);
        }
        let lines = match rules.heading_wrap {
            Some(width) => wrap(&heading, width),
            None => vec![heading],
        };
        ctx.with_style(TIME_HEADING, |ctx| {
            ctx.wrapped(left + 10.0, &lines, rules.time_heading_advance, ITINERARY_LOW_WATER)
        });
        stats.time_headings += 1;
        return;
    }

    let body = if ascii { ascii_safe(line) } else { line.to_string() };
    let lines = wrap(&body, rules.body_wrap);
    stats.body_lines += ctx.with_style(BODY, |ctx| {
        ctx.wrapped(left + rules.body_indent, &lines, 14.0, ITINERARY_LOW_WATER)
    });
}

fn draw_record_section(
    ctx: &mut RenderContext<'_>,
    kind: RecordKind,
    body: &str,
    stats: &mut RenderStats,
    issues: &mut Vec<RecordIssue>,
) {
    ctx.start_page();
    ctx.with_style(RECORD_SECTION_HEADING, |ctx| ctx.centered(kind.title()));
    ctx.advance(30.0);
    ctx.rule();
    ctx.advance(35.0);

    let chunked = chunk_records(kind, body);
    if let Some(issue) = chunked.issue {
        warn!("{}", issue);
        stats.dropped_record_lines += chunked.dropped;
        issues.push(issue);
    }

    for record in &chunked.records {
        ctx.ensure_room(kind.low_water());
        record.draw(ctx);
    }
    match kind {
        RecordKind::Restaurant => stats.restaurants += chunked.records.len(),
        RecordKind::Hotel => stats.hotels += chunked.records.len(),
    }
    debug!("Laid out {} {} record(s)", chunked.records.len(), kind);
}
