//! Fixed-stride record sections (hotels and restaurants).
//!
//! A record section body is a list of non-blank lines in which every record
//! occupies the same number of lines. Lines are consumed in whole strides;
//! a trailing group shorter than the stride does not form a record and is
//! dropped, but the drop is reported as a [`RecordIssue`].

use crate::error::RecordIssue;
use crate::output::{Font, TextStyle};
use crate::pipeline::layout::{RenderContext, BODY};
use crate::pipeline::normalize::{is_star_run, normalize_stars};
use crate::pipeline::wrap::wrap;
use crate::plan::PlanSection;
use serde::{Deserialize, Serialize};
use std::fmt;

const NAME: TextStyle = TextStyle::new(Font::HelveticaBold, 14.0);
const CUISINE: TextStyle = TextStyle::new(Font::HelveticaOblique, 12.0);
const RATING: TextStyle = TextStyle::new(Font::Helvetica, 12.0);
const STARS: TextStyle = TextStyle::new(Font::ZapfDingbats, 12.0);

const DESCRIPTION_WRAP: usize = 90;
const DESCRIPTION_INDENT: f32 = 15.0;
const FIELD_ADVANCE: f32 = 18.0;
const LINE_ADVANCE: f32 = 14.0;
const LINK_ADVANCE: f32 = 16.0;
const RECORD_GAP: f32 = 25.0;

/// Kind of record section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Restaurant,
    Hotel,
}

impl RecordKind {
    /// Record sections in document order.
    pub const SECTION_ORDER: [RecordKind; 2] = [RecordKind::Restaurant, RecordKind::Hotel];

    /// Lines per record.
    pub const fn stride(self) -> usize {
        match self {
            RecordKind::Restaurant => 4,
            RecordKind::Hotel => 6,
        }
    }

    /// Start a new page before a record when the cursor is below this.
    pub const fn low_water(self) -> f32 {
        match self {
            RecordKind::Restaurant => 140.0,
            RecordKind::Hotel => 160.0,
        }
    }

    /// Centred heading of the section page.
    pub const fn title(self) -> &'static str {
        match self {
            RecordKind::Restaurant => "Restaurant Recommendations",
            RecordKind::Hotel => "Hotel Recommendations",
        }
    }

    pub const fn section(self) -> PlanSection {
        match self {
            RecordKind::Restaurant => PlanSection::Restaurants,
            RecordKind::Hotel => PlanSection::Hotels,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Restaurant => "restaurant",
            RecordKind::Hotel => "hotel",
        })
    }
}

/// One restaurant card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restaurant<'a> {
    pub name: &'a str,
    pub cuisine: &'a str,
    pub description: &'a str,
    pub link: &'a str,
}

/// One hotel card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotel<'a> {
    pub name: &'a str,
    /// Raw rating line; normalised when drawn.
    pub rating: &'a str,
    pub description: &'a str,
    pub links: [&'a str; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Restaurant(Restaurant<'a>),
    Hotel(Hotel<'a>),
}

impl<'a> Record<'a> {
    /// Build a record from exactly `kind.stride()` lines.
    ///
    /// # Panics
    /// When `group.len() != kind.stride()`.
    fn from_group(kind: RecordKind, group: &[&'a str]) -> Self {
        match (kind, group) {
            (RecordKind::Restaurant, &[name, cuisine, description, link]) => {
                Record::Restaurant(Restaurant {
                    name,
                    cuisine,
                    description,
                    link,
                })
            }
            (RecordKind::Hotel, &[name, rating, description, a, b, c]) => Record::Hotel(Hotel {
                name,
                rating,
                description,
                links: [a, b, c],
            }),
            _ => unreachable!(
                "{} group of {} line(s), stride is {}",
                kind,
                group.len(),
                kind.stride()
            ),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Record::Restaurant(r) => r.name,
            Record::Hotel(h) => h.name,
        }
    }

    /// Draw the card at the cursor.
    ///
    /// Description lines and links each start a new page once the cursor
    /// drops below the bottom margin.
    pub fn draw(&self, ctx: &mut RenderContext<'_>) {
        let left = ctx.geometry().left();
        ctx.with_style(NAME, |ctx| ctx.text(left, self.name()));
        ctx.advance(FIELD_ADVANCE);

        match self {
            Record::Restaurant(r) => {
                ctx.with_style(CUISINE, |ctx| ctx.text(left, r.cuisine));
                ctx.advance(FIELD_ADVANCE);
                draw_description(ctx, r.description);
                draw_link(ctx, r.link);
            }
            Record::Hotel(h) => {
                let rating = normalize_stars(h.rating);
                let style = if is_star_run(&rating) { STARS } else { RATING };
                ctx.with_style(style, |ctx| ctx.text(left, &rating));
                ctx.advance(FIELD_ADVANCE);
                draw_description(ctx, h.description);
                for link in h.links {
                    draw_link(ctx, link);
                    ctx.advance(LINK_ADVANCE);
                }
            }
        }
        ctx.advance(RECORD_GAP);
    }
}

fn draw_description(ctx: &mut RenderContext<'_>, description: &str) {
    let left = ctx.geometry().left();
    let floor = ctx.geometry().bottom_margin;
    let lines = wrap(description, DESCRIPTION_WRAP);
    ctx.with_style(BODY, |ctx| {
        ctx.wrapped(left + DESCRIPTION_INDENT, &lines, LINE_ADVANCE, floor)
    });
}

fn draw_link(ctx: &mut RenderContext<'_>, url: &str) {
    let left = ctx.geometry().left();
    let floor = ctx.geometry().bottom_margin;
    ctx.ensure_room(floor);
    ctx.link(left + DESCRIPTION_INDENT, url);
}

/// Records parsed from a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunked<'a> {
    pub records: Vec<Record<'a>>,
    /// Set when trailing lines did not fill a record.
    pub issue: Option<RecordIssue>,
    /// Number of trailing lines left out.
    pub dropped: usize,
}

/// Split a section body into whole records of `kind`.
pub fn chunk_records(kind: RecordKind, body: &str) -> Chunked<'_> {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let groups = lines.chunks_exact(kind.stride());
    let leftover = groups.remainder();
    let issue = leftover.first().map(|first| RecordIssue::PartialGroup {
        kind,
        stride: kind.stride(),
        leftover: leftover.len(),
        first_line: first.to_string(),
    });
    let dropped = leftover.len();

    let records = groups
        .map(|group| Record::from_group(kind, group))
        .collect();

    Chunked {
        records,
        issue,
        dropped,
    }
}
