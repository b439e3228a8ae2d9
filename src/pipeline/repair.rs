//! Section repair: make sure every day of an itinerary has breakfast, lunch
//! and an evening activity.
//!
//! A day is the run of lines from one day heading up to the next. Presence is
//! a case-insensitive substring test over the day's lines (the heading itself
//! excluded), so "Lunch at the pier" and "- lunch: tapas" both count, while a
//! day that only says "midday meal" gets a synthesized lunch line. Lines before
//! the first day heading are not a day and pass through untouched.

use crate::config::RepairPlacement;
use crate::pipeline::normalize::{
    clean_line, is_day_heading, time_label, TimeLabel, DETAILED_VOCABULARY,
};

/// A day part every day must mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPart {
    /// Lower-case substring whose presence satisfies the part.
    pub label: &'static str,
    /// Where the part sits in the day, for chronological placement.
    pub slot: TimeLabel,
    /// Line synthesized when the part is missing.
    pub default_line: &'static str,
}

/// Required parts in synthesis order.
pub const REQUIRED_PARTS: [RequiredPart; 3] = [
    RequiredPart {
        label: "breakfast",
        slot: TimeLabel::Breakfast,
        default_line: "- Breakfast: Enjoy breakfast at a nearby cafe or hotel restaurant.",
    },
    RequiredPart {
        label: "lunch",
        slot: TimeLabel::Lunch,
        default_line: "- Lunch: Have a relaxed meal at a family-friendly restaurant.",
    },
    RequiredPart {
        label: "evening activity",
        slot: TimeLabel::Evening,
        default_line:
            "- Evening Activity: Take a calm evening stroll or attend a local cultural event.",
    },
];

/// Result of [`repair_plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    /// Number of default lines added across all days.
    pub synthesized: usize,
    /// Number of day records seen.
    pub days: usize,
}

/// Add default lines for missing required parts to every day record.
pub fn repair_plan(text: &str, placement: RepairPlacement) -> RepairOutcome {
    let mut out: Vec<&str> = Vec::new();
    let mut day: Option<DayBuffer<'_>> = None;
    let mut synthesized = 0;
    let mut days = 0;

    for line in text.split('\n') {
        if is_day_heading(&clean_line(line)) {
            if let Some(done) = day.take() {
                synthesized += done.flush(placement, &mut out);
            }
            days += 1;
            day = Some(DayBuffer::new(line));
            continue;
        }
        match day.as_mut() {
            Some(current) => current.push(line),
            None => out.push(line),
        }
    }
    if let Some(done) = day.take() {
        synthesized += done.flush(placement, &mut out);
    }

    RepairOutcome {
        text: out.join("\n"),
        synthesized,
        days,
    }
}

struct DayBuffer<'a> {
    lines: Vec<&'a str>,
    seen: [bool; REQUIRED_PARTS.len()],
}

impl<'a> DayBuffer<'a> {
    fn new(heading: &'a str) -> Self {
        Self {
            lines: vec![heading],
            seen: [false; REQUIRED_PARTS.len()],
        }
    }

    fn push(&mut self, line: &'a str) {
        let lower = line.to_lowercase();
        for (seen, part) in self.seen.iter_mut().zip(REQUIRED_PARTS.iter()) {
            *seen |= lower.contains(part.label);
        }
        self.lines.push(line);
    }

    /// Write the day (plus any defaults) to `out`; returns lines added.
    fn flush(mut self, placement: RepairPlacement, out: &mut Vec<&'a str>) -> usize {
        let parts: &'static [RequiredPart] = &REQUIRED_PARTS;
        let missing: Vec<&RequiredPart> = parts
            .iter()
            .zip(self.seen)
            .filter(|(_, seen)| !seen)
            .map(|(part, _)| part)
            .collect();

        for part in &missing {
            let at = match placement {
                RepairPlacement::Append => self.after_last_content(),
                RepairPlacement::Chronological => self
                    .first_later_heading(part.slot)
                    .unwrap_or_else(|| self.after_last_content()),
            };
            self.lines.insert(at, part.default_line);
        }

        out.extend(self.lines);
        missing.len()
    }

    /// Index just past the last non-blank line. Trailing blank lines stay last.
    fn after_last_content(&self) -> usize {
        self.lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(self.lines.len(), |i| i + 1)
    }

    /// Index of the first line (after the heading) whose time heading comes
    /// later in the day than `slot`.
    fn first_later_heading(&self, slot: TimeLabel) -> Option<usize> {
        self.lines.iter().enumerate().skip(1).find_map(|(i, line)| {
            time_label(&clean_line(line), DETAILED_VOCABULARY)
                .filter(|label| label.rank() > slot.rank())
                .map(|_| i)
        })
    }
}
