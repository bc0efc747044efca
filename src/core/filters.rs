//! Fetch-side filter resolution: time ranges and duration predicates.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::errors::{AppError, AppResult};
use crate::parser::{TemporalResolver, duration_literal};
use crate::utils::to_internal;

/// Named relative periods selectable on the fetch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Yesterday,
    Today,
    Day,
    Week,
    Month,
    Year,
}

/// The mutually exclusive range options accepted by the fetch path.
/// Precedence when several are given: period, on, at, since, start/end.
#[derive(Debug, Clone, Default)]
pub struct FetchRange {
    pub start: String,
    pub end: String,
    pub since: String,
    pub period: Option<Period>,
    pub on: Option<String>,
    pub at: Option<String>,
}

/// Resolve the range options into one validated `(start, end)` interval,
/// normalized to the internal timezone.
pub fn resolve_range(
    range: &FetchRange,
    resolver: &TemporalResolver,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let now = resolver.reference_now();
    // past week is the default
    let mut start = now - Duration::days(7);
    let mut end = now;

    if let Some(period) = range.period {
        match period {
            Period::Yesterday => {
                start = resolver.resolve("12am yesterday")?;
                end = resolver.resolve("12am today")? - Duration::seconds(1);
            }
            Period::Today => start = resolver.resolve("12am today")?,
            Period::Day => start = resolver.resolve("yesterday")?,
            Period::Week => {} // the default range
            Period::Month => start = resolver.resolve("1 month ago")?,
            Period::Year => start = resolver.resolve("1 year ago")?,
        }
    } else if let Some(on) = &range.on {
        start = resolver.resolve(on)?;
        end = start + Duration::hours(24) - Duration::seconds(1);
    } else if let Some(at) = &range.at {
        start = resolver.resolve(at)?;
        end = start;
    } else if !range.since.trim().is_empty() {
        start = resolver.resolve(&range.since)?;
    } else {
        // need a start to avoid fetching everything since
        // the beginning of time.
        if range.start.trim().is_empty() && !range.end.trim().is_empty() {
            return Err(AppError::StartDateAbsent);
        }
        if !range.start.trim().is_empty() {
            start = resolver.resolve(&range.start)?;
        }
        if !range.end.trim().is_empty() {
            end = resolver.resolve(&range.end)?;
        }
    }

    if start > end {
        return Err(AppError::StartDateGreater);
    }

    Ok((to_internal(start), to_internal(end)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

static FILTER_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<op>[=<>]*)\s*(?P<value>.*)$").expect("duration filter regex")
});

/// A compiled duration predicate: an operator and a threshold in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationFilter {
    op: CmpOp,
    minutes: f64,
}

impl DurationFilter {
    /// Compile an expression like ">=2h" or "90m". The operator defaults
    /// to equality when omitted.
    pub fn compile(expression: &str) -> AppResult<Self> {
        let caps = FILTER_SPLIT_RE
            .captures(expression)
            .ok_or_else(|| AppError::CannotFetchWork("Invalid duration filter".into()))?;

        let op = match &caps["op"] {
            "" | "=" | "==" => CmpOp::Eq,
            "<" => CmpOp::Lt,
            ">" => CmpOp::Gt,
            "<=" => CmpOp::Le,
            ">=" => CmpOp::Ge,
            _ => return Err(AppError::CannotFetchWork("Invalid duration operator".into())),
        };

        let minutes = duration_literal(&caps["value"])
            .ok_or_else(|| AppError::CannotFetchWork("Invalid duration filter".into()))?;

        Ok(Self { op, minutes })
    }

    /// Test a stored duration (in minutes) against the predicate.
    pub fn matches(&self, duration: f64) -> bool {
        match self.op {
            CmpOp::Eq => duration == self.minutes,
            CmpOp::Lt => duration < self.minutes,
            CmpOp::Gt => duration > self.minutes,
            CmpOp::Le => duration <= self.minutes,
            CmpOp::Ge => duration >= self.minutes,
        }
    }
}
