//! Text normalisation: turn model prose into lines the layout engine can place.
//!
//! Model output is plain text sprinkled with Markdown habits (`## Day 1`,
//! `**Morning:**`), emoji ratings (`⭐⭐⭐⭐`) and the occasional chatty
//! opener. None of that has a meaning on a printed page, so this module
//! strips it line by line and tags each line with a [`LineClass`] that the
//! layout engine maps to a font, colour and indentation.
//!
//! Two entry points exist:
//!
//! - [`normalize_plan_text`] runs once over a whole generated body.
//! - [`clean_line`] + [`LineClassifier`] run per line during layout.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ── Vocabulary ───────────────────────────────────────────────────────────────

/// A period-of-day or meal label that opens a time heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLabel {
    Breakfast,
    Morning,
    Lunch,
    Afternoon,
    Evening,
    Dinner,
}

impl TimeLabel {
    /// Lower-case prefix that identifies the label.
    pub const fn keyword(self) -> &'static str {
        match self {
            TimeLabel::Breakfast => "breakfast",
            TimeLabel::Morning => "morning",
            TimeLabel::Lunch => "lunch",
            TimeLabel::Afternoon => "afternoon",
            TimeLabel::Evening => "evening",
            TimeLabel::Dinner => "dinner",
        }
    }

    /// Position of the label within a day, earliest first.
    pub const fn rank(self) -> u8 {
        match self {
            TimeLabel::Breakfast => 0,
            TimeLabel::Morning => 1,
            TimeLabel::Lunch => 2,
            TimeLabel::Afternoon => 3,
            TimeLabel::Evening => 4,
            TimeLabel::Dinner => 5,
        }
    }
}

/// Period-of-day headings only.
pub const CLASSIC_VOCABULARY: &[TimeLabel] =
    &[TimeLabel::Morning, TimeLabel::Afternoon, TimeLabel::Evening];

/// Period-of-day and meal headings.
pub const DETAILED_VOCABULARY: &[TimeLabel] = &[
    TimeLabel::Breakfast,
    TimeLabel::Morning,
    TimeLabel::Lunch,
    TimeLabel::Afternoon,
    TimeLabel::Evening,
    TimeLabel::Dinner,
];

// ── Classification ───────────────────────────────────────────────────────────

/// What a cleaned line is, for styling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    /// The plan's opening sentence (first non-empty, non-day line; once).
    Intro,
    /// `Day 1: Arrival`
    DayHeading,
    /// `Morning: …`, `- Lunch at …`
    TimeHeading(TimeLabel),
    /// `- Visit the museum`
    BulletBody,
    /// Anything else, including blank lines.
    PlainBody,
}

/// Stateful per-document classifier.
///
/// The intro rule is a one-shot: once a line has been tagged
/// [`LineClass::Intro`] no later line can be. Day and time headings are never
/// taken as the intro.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    vocabulary: &'static [TimeLabel],
    intro_pending: bool,
}

impl LineClassifier {
    pub fn new(vocabulary: &'static [TimeLabel], detect_intro: bool) -> Self {
        Self {
            vocabulary,
            intro_pending: detect_intro,
        }
    }

    /// Classify a line that has already been through [`clean_line`].
    pub fn classify(&mut self, line: &str) -> LineClass {
        if is_day_heading(line) {
            return LineClass::DayHeading;
        }
        if let Some(label) = time_label(line, self.vocabulary) {
            return LineClass::TimeHeading(label);
        }
        if self.intro_pending && !line.is_empty() {
            self.intro_pending = false;
            return LineClass::Intro;
        }
        if line.starts_with(['-', '•']) {
            LineClass::BulletBody
        } else {
            LineClass::PlainBody
        }
    }
}

/// Strip leading bullet markers (`•`, `-`) and surrounding whitespace.
pub fn strip_bullet_markers(line: &str) -> &str {
    line.trim_start_matches(['•', '-', ' ']).trim()
}

/// `true` when the line (bullets ignored) starts with "day", any case.
pub fn is_day_heading(line: &str) -> bool {
    starts_with_ignore_ascii_case(strip_bullet_markers(line), "day")
}

/// The vocabulary label the line (bullets ignored) starts with, if any.
pub fn time_label(line: &str, vocabulary: &[TimeLabel]) -> Option<TimeLabel> {
    let stripped = strip_bullet_markers(line);
    vocabulary
        .iter()
        .copied()
        .find(|label| starts_with_ignore_ascii_case(stripped, label.keyword()))
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

// ── Per-line cleanup ─────────────────────────────────────────────────────────

static RE_HEADING_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s*").unwrap());

/// Remove Markdown heading markers and emphasis from one line.
///
/// Runs to a fixed point, so `clean_line(&clean_line(x)) == clean_line(x)`
/// for every input: `** # Title` needs two rounds (`**` first, then `#`).
pub fn clean_line(line: &str) -> String {
    let mut current = line.trim().to_string();
    loop {
        let stripped = RE_HEADING_MARKERS.replace(&current, "").replace("**", "");
        let stripped = stripped.trim();
        if stripped == current {
            return current;
        }
        current = stripped.to_string();
    }
}

const EMOJI_STAR: char = '\u{2B50}';

/// Glyph used for a normalised star rating.
pub const RATING_STAR: char = '\u{2605}';

/// Re-emit a run of emoji stars as plain rating stars.
///
/// Lines without emoji stars pass through untouched, so a model that already
/// wrote `★★★★` (or "4-star") is left alone.
pub fn normalize_stars(line: &str) -> Cow<'_, str> {
    let count = line.chars().filter(|&c| c == EMOJI_STAR).count();
    if count == 0 {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(std::iter::repeat_n(RATING_STAR, count).collect())
    }
}

/// `true` when the line is nothing but rating stars (and spaces).
pub fn is_star_run(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == RATING_STAR || c == ' ')
}

const HEADING_ICONS: &[(&str, &str)] = &[
    ("breakfast", "\u{1F373}"),
    ("morning", "\u{1F305}"),
    ("lunch", "\u{1F374}"),
    ("afternoon", "\u{2600}\u{FE0F}"),
    ("evening activity", "\u{1F3AD}"),
    ("dinner", "\u{1F37D}\u{FE0F}"),
];

/// Icon for a time heading, matched by case-insensitive prefix.
///
/// A bare "Evening" has no icon; only "Evening Activity" does.
pub fn heading_icon(text: &str) -> Option<&'static str> {
    HEADING_ICONS
        .iter()
        .find(|(prefix, _)| starts_with_ignore_ascii_case(text, prefix))
        .map(|(_, icon)| *icon)
}

/// Prefix the heading with its icon; unknown headings pass through.
pub fn iconize(text: &str) -> Cow<'_, str> {
    match heading_icon(text) {
        Some(icon) => Cow::Owned(format!("{icon} {text}")),
        None => Cow::Borrowed(text),
    }
}

/// Split a run-on line at `" - "` into separate `- ` bullets.
///
/// En and em dashes count as hyphens. A line without the separator yields
/// itself as the only element.
pub fn split_bullets(line: &str) -> Vec<String> {
    let line = line.replace(['\u{2013}', '\u{2014}'], "-");
    if !line.contains(" - ") {
        return vec![line];
    }
    line.split(" - ")
        .map(|part| part.trim_start_matches(['•', '-']).trim())
        .filter(|part| !part.is_empty())
        .map(|part| format!("- {part}"))
        .collect()
}

/// Drop every non-ASCII character, then trim.
///
/// Lossy on purpose: the standard PDF fonts cannot show emoji, and a dropped
/// character is less confusing on paper than a replacement box.
pub fn ascii_safe(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_string()
}

// ── Whole-body cleanup for generated text ────────────────────────────────────

/// Tidy a freshly generated body before it is stored or rendered.
///
/// Rules (applied in order):
/// 1. Strip outer markdown fences (models sometimes disobey the prompt)
/// 2. Normalise line endings (CRLF → LF)
/// 3. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 4. Drop a chatty opener ("Sure! Here is your plan:")
/// 5. Trim trailing whitespace per line and at the end of the body
pub fn normalize_plan_text(input: &str) -> String {
    let s = strip_markdown_fences(input);
    let s = normalise_line_endings(&s);
    let s = remove_invisible_chars(&s);
    let s = drop_chatty_preamble(&s);
    trim_trailing_whitespace(&s)
}

// ── Rule 1: Strip outer markdown fences ──────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|text)?\r?\n(.*)\r?\n```\s*$").unwrap());

fn strip_markdown_fences(input: &str) -> String {
    match RE_OUTER_FENCES.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Remove invisible Unicode characters ──────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 4: Drop a chatty opener ─────────────────────────────────────────────
//
// The prompt asks the model not to open with "Sure" or "Here is", but it does
// anyway often enough. Such a line would otherwise become the intro line.

static RE_CHATTY_PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:sure|certainly|of course|absolutely|here is|here's|here are)\b[^\n]*(?:\n|$)")
        .unwrap()
});

fn drop_chatty_preamble(input: &str) -> String {
    RE_CHATTY_PREAMBLE.replace(input, "").to_string()
}

// ── Rule 5: Trim trailing whitespace ─────────────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_headings_and_emphasis() {
        assert_eq!(clean_line("## Day 1: Arrival"), "Day 1: Arrival");
        assert_eq!(clean_line("  **Morning:** museum  "), "Morning: museum");
        assert_eq!(clean_line("### **Day 2**"), "Day 2");
    }

    #[test]
    fn test_clean_line_is_idempotent() {
        let inputs = [
            "** # Title",
            "# ** ## Nested",
            "#####",
            "**",
            "plain text",
            "  #  **bold** and # hash  ",
            "",
        ];
        for input in inputs {
            let once = clean_line(input);
            assert_eq!(clean_line(&once), once, "input: {input:?}");
            assert!(!once.starts_with('#'), "input: {input:?} → {once:?}");
            assert!(!once.contains("**"), "input: {input:?} → {once:?}");
        }
    }

    #[test]
    fn test_normalize_stars() {
        assert_eq!(normalize_stars("⭐⭐⭐⭐"), "★★★★");
        assert_eq!(normalize_stars("⭐️⭐️⭐️"), "★★★");
        assert_eq!(normalize_stars("4-star hotel"), "4-star hotel");
    }

    #[test]
    fn test_normalize_stars_is_idempotent() {
        for input in ["⭐⭐⭐⭐⭐", "★★★", "Rating: 4/5", ""] {
            let once = normalize_stars(input).into_owned();
            assert_eq!(normalize_stars(&once), once);
        }
    }

    #[test]
    fn test_is_star_run() {
        assert!(is_star_run("★★★★"));
        assert!(is_star_run(" ★ ★ "));
        assert!(!is_star_run("4 stars"));
        assert!(!is_star_run(""));
    }

    #[test]
    fn test_day_heading_detection() {
        assert!(is_day_heading("Day 1: Arrival"));
        assert!(is_day_heading("- DAY 2"));
        assert!(is_day_heading("• day three"));
        assert!(!is_day_heading("Morning: day trip"));
    }

    #[test]
    fn test_time_label_respects_vocabulary() {
        assert_eq!(
            time_label("Morning: museum", CLASSIC_VOCABULARY),
            Some(TimeLabel::Morning)
        );
        assert_eq!(time_label("- Lunch: tapas", CLASSIC_VOCABULARY), None);
        assert_eq!(
            time_label("- Lunch: tapas", DETAILED_VOCABULARY),
            Some(TimeLabel::Lunch)
        );
        assert_eq!(
            time_label("EVENING ACTIVITY: opera", DETAILED_VOCABULARY),
            Some(TimeLabel::Evening)
        );
    }

    #[test]
    fn test_intro_is_consumed_once() {
        let mut classifier = LineClassifier::new(CLASSIC_VOCABULARY, true);
        assert_eq!(classifier.classify(""), LineClass::PlainBody);
        assert_eq!(classifier.classify("Day 1"), LineClass::DayHeading);
        assert_eq!(classifier.classify("A sunny week in Nice."), LineClass::Intro);
        assert_eq!(classifier.classify("Another sentence."), LineClass::PlainBody);
        assert_eq!(classifier.classify("- Walk"), LineClass::BulletBody);
        assert_eq!(
            classifier.classify("Afternoon: beach"),
            LineClass::TimeHeading(TimeLabel::Afternoon)
        );
    }

    #[test]
    fn test_time_heading_is_never_the_intro() {
        let mut classifier = LineClassifier::new(CLASSIC_VOCABULARY, true);
        assert_eq!(classifier.classify("Day 1"), LineClass::DayHeading);
        assert_eq!(
            classifier.classify("Morning: Visit museum"),
            LineClass::TimeHeading(TimeLabel::Morning)
        );
        assert_eq!(classifier.classify("Pack light."), LineClass::Intro);
    }

    #[test]
    fn test_no_intro_when_disabled() {
        let mut classifier = LineClassifier::new(DETAILED_VOCABULARY, false);
        assert_eq!(classifier.classify("Welcome to Nice."), LineClass::PlainBody);
    }

    #[test]
    fn test_iconize() {
        assert_eq!(iconize("Breakfast: croissant"), "\u{1F373} Breakfast: croissant");
        assert_eq!(iconize("evening activity: jazz"), "\u{1F3AD} evening activity: jazz");
        assert_eq!(iconize("Evening: stroll"), "Evening: stroll");
        assert_eq!(iconize("Sightseeing"), "Sightseeing");
    }

    #[test]
    fn test_split_bullets() {
        assert_eq!(
            split_bullets("Morning: Louvre - Lunch: bistro – Afternoon: Seine"),
            vec!["- Morning: Louvre", "- Lunch: bistro", "- Afternoon: Seine"]
        );
        assert_eq!(split_bullets("No separator here"), vec!["No separator here"]);
        assert_eq!(split_bullets("- Walk - - "), vec!["- Walk"]);
    }

    #[test]
    fn test_ascii_safe() {
        assert_eq!(ascii_safe("\u{1F305} Morning: café  "), "Morning: caf");
        assert_eq!(ascii_safe("plain"), "plain");
    }

    #[test]
    fn test_strip_fences() {
        let input = "```markdown\nDay 1\nMorning\n```";
        assert_eq!(strip_markdown_fences(input), "Day 1\nMorning");
    }

    #[test]
    fn test_drop_chatty_preamble() {
        assert_eq!(
            drop_chatty_preamble("Sure! Here is your plan:\nDay 1"),
            "Day 1"
        );
        assert_eq!(
            drop_chatty_preamble("A relaxed week in Kyoto.\nDay 1"),
            "A relaxed week in Kyoto.\nDay 1"
        );
    }

    #[test]
    fn test_normalize_plan_text_full_pipeline() {
        let input = "```\r\nHere's a 2-day plan:\r\nDay 1\u{200B}   \r\nMorning: walk\r\n```";
        assert_eq!(normalize_plan_text(input), "Day 1\nMorning: walk");
    }
}
