//! Input extraction pipeline.
//!
//! Pulls structured tokens (tags, duration, date phrase) out of a raw line
//! of user input and yields a cleaned work description.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::errors::{AppError, AppResult};

pub mod phrase;
pub mod resolver;

pub use resolver::TemporalResolver;

/// Everything extracted from one raw input line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWork {
    pub work: String,
    pub timestamp: DateTime<FixedOffset>,
    pub duration: Option<f64>,
    pub tags: HashSet<String>,
}

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_-]+)").expect("tag regex"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(\d+(?:\.\d+)?)\s*(h|hr|hrs|hours|m|min|mins|minutes)\s*\]")
        .expect("duration regex")
});

static DURATION_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(h|hr|hrs|hours|m|min|mins|minutes)\s*$")
        .expect("duration literal regex")
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("ws regex"));

/// Convert a number/unit pair to minutes. Hour values are rounded to two
/// decimal places; minute values pass through as given.
fn to_minutes(value: f64, unit: &str) -> f64 {
    if unit.starts_with('h') {
        (value * 60.0 * 100.0).round() / 100.0
    } else {
        value
    }
}

/// Parse a bare duration literal like "2h" or "45 min" into minutes.
/// Shared with the duration filter grammar.
pub fn duration_literal(s: &str) -> Option<f64> {
    let caps = DURATION_LITERAL_RE.captures(s)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(to_minutes(value, &caps[2].to_lowercase()))
}

/// Parses a raw input line into its structured parts.
pub struct InputParser {
    resolver: TemporalResolver,
}

impl InputParser {
    pub fn new(reference_now: DateTime<FixedOffset>) -> Self {
        Self {
            resolver: TemporalResolver::new(reference_now),
        }
    }

    /// Extract all `#tag` tokens. Case is preserved here; normalization to
    /// lowercase happens at storage time.
    pub fn parse_tags(&self, text: &str) -> HashSet<String> {
        TAG_RE
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Extract the first bracketed duration expression as minutes.
    /// Unrecognized bracket content is not an error; the text is simply
    /// left untouched by this field.
    pub fn parse_duration(&self, text: &str) -> Option<f64> {
        let caps = DURATION_RE.captures(text)?;
        let value: f64 = caps[1].parse().ok()?;
        Some(to_minutes(value, &caps[2].to_lowercase()))
    }

    /// Strip the first duration bracket and all tag tokens, then collapse
    /// whitespace runs and trim.
    pub fn clean_work(&self, text: &str) -> String {
        let without_duration = DURATION_RE.replace(text, "");
        let without_tags = TAG_RE.replace_all(&without_duration, "");
        WHITESPACE_RE
            .replace_all(&without_tags, " ")
            .trim()
            .to_string()
    }

    /// Parse a full input line.
    ///
    /// The line is partitioned on the last `@` into a work part and a date
    /// phrase; duration and tags are pulled from the work part before
    /// cleaning. An empty description after cleaning fails with
    /// `InvalidWork`.
    pub fn parse(&self, raw: &str) -> AppResult<ParsedWork> {
        let (work_part, date_part) = match raw.rfind('@') {
            Some(idx) => (&raw[..idx], &raw[idx + 1..]),
            None => (raw, ""),
        };

        let duration = self.parse_duration(work_part);
        let tags = self.parse_tags(work_part);
        let work = self.clean_work(work_part);
        if work.is_empty() {
            return Err(AppError::InvalidWork);
        }

        let timestamp = self.resolver.resolve(date_part)?;

        Ok(ParsedWork {
            work,
            timestamp,
            duration,
            tags,
        })
    }
}
