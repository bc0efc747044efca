//! English date-phrase grammar.
//!
//! Resolves free-text phrases like "yesterday", "2pm yesterday", "3 days ago"
//! or "June 23 2010" into a concrete instant relative to a reference "now".
//! This is the only date grammar in the crate; the temporal resolver layers
//! the future check and the time-of-day correction on top of it.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Outcome of a successful phrase resolution.
///
/// `has_date` is false when the phrase encoded only a time of day, so the
/// resolver knows the date component was assumed rather than stated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPhrase {
    pub instant: DateTime<FixedOffset>,
    pub has_date: bool,
}

static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<ago>(?P<n1>a|an|\d+) (?P<u1>second|minute|min|hour|hr|day|week|month|year)s? ago)|(?P<in>in (?P<n2>a|an|\d+) (?P<u2>second|minute|min|hour|hr|day|week|month|year)s?)|(?P<next>next (?P<u3>minute|hour|day|week|month|year))|(?P<last>last (?P<u4>minute|hour|day|week|month|year)))$",
    )
    .expect("relative phrase regex")
});

static DAY_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<pre>.+) )?(?P<day>today|yesterday|tomorrow)(?: (?:at )?(?P<post>.+))?$")
        .expect("day word regex")
});

static AMPM_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::(\d{2}))? ?(am|pm)$").expect("am/pm time regex"));

static CLOCK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("clock time regex"));

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
];

/// Try to resolve a phrase against the reference instant.
/// Returns None when the grammar does not recognize the input at all;
/// a recognized phrase that happens to lie in the future still resolves.
pub fn try_resolve(phrase: &str, reference_now: DateTime<FixedOffset>) -> Option<ResolvedPhrase> {
    let normalized = phrase.trim().to_lowercase();
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }

    if normalized == "now" {
        return Some(ResolvedPhrase {
            instant: reference_now,
            has_date: true,
        });
    }

    if let Some(instant) = resolve_relative(&normalized, reference_now) {
        return Some(ResolvedPhrase {
            instant,
            has_date: true,
        });
    }

    if let Some(resolved) = resolve_day_word(&normalized, reference_now) {
        return Some(resolved);
    }

    if let Some(time) = parse_time_of_day(&normalized) {
        let instant = at_local(reference_now, reference_now.date_naive().and_time(time))?;
        return Some(ResolvedPhrase {
            instant,
            has_date: false,
        });
    }

    resolve_absolute(&normalized, reference_now).map(|instant| ResolvedPhrase {
        instant,
        has_date: true,
    })
}

/// "N <unit> ago", "in N <unit>", "next <unit>", "last <unit>".
fn resolve_relative(
    phrase: &str,
    reference_now: DateTime<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    let caps = RELATIVE_RE.captures(phrase)?;

    let (count, unit, backwards) = if caps.name("ago").is_some() {
        (caps.name("n1")?.as_str(), caps.name("u1")?.as_str(), true)
    } else if caps.name("in").is_some() {
        (caps.name("n2")?.as_str(), caps.name("u2")?.as_str(), false)
    } else if caps.name("next").is_some() {
        ("1", caps.name("u3")?.as_str(), false)
    } else {
        ("1", caps.name("u4")?.as_str(), true)
    };

    let n: i64 = match count {
        "a" | "an" => 1,
        other => other.parse().ok()?,
    };

    shift(reference_now, n, unit, backwards)
}

fn shift(
    base: DateTime<FixedOffset>,
    n: i64,
    unit: &str,
    backwards: bool,
) -> Option<DateTime<FixedOffset>> {
    match unit {
        "second" => apply(base, Duration::seconds(n), backwards),
        "minute" | "min" => apply(base, Duration::minutes(n), backwards),
        "hour" | "hr" => apply(base, Duration::hours(n), backwards),
        "day" => apply(base, Duration::days(n), backwards),
        "week" => apply(base, Duration::weeks(n), backwards),
        "month" => apply_months(base, u32::try_from(n).ok()?, backwards),
        "year" => apply_months(base, u32::try_from(n.checked_mul(12)?).ok()?, backwards),
        _ => None,
    }
}

fn apply(
    base: DateTime<FixedOffset>,
    delta: Duration,
    backwards: bool,
) -> Option<DateTime<FixedOffset>> {
    if backwards {
        base.checked_sub_signed(delta)
    } else {
        base.checked_add_signed(delta)
    }
}

fn apply_months(
    base: DateTime<FixedOffset>,
    months: u32,
    backwards: bool,
) -> Option<DateTime<FixedOffset>> {
    if backwards {
        base.checked_sub_months(Months::new(months))
    } else {
        base.checked_add_months(Months::new(months))
    }
}

/// "today", "yesterday", "tomorrow", optionally combined with a time of day
/// on either side ("12am yesterday", "yesterday at 3pm"). A bare day word
/// keeps the reference clock time.
fn resolve_day_word(
    phrase: &str,
    reference_now: DateTime<FixedOffset>,
) -> Option<ResolvedPhrase> {
    let caps = DAY_WORD_RE.captures(phrase)?;

    let date = match caps.name("day")?.as_str() {
        "today" => reference_now.date_naive(),
        "yesterday" => reference_now.date_naive().pred_opt()?,
        "tomorrow" => reference_now.date_naive().succ_opt()?,
        _ => return None,
    };

    let time = match (caps.name("pre"), caps.name("post")) {
        (None, None) => reference_now.time(),
        (Some(t), None) | (None, Some(t)) => parse_time_of_day(t.as_str())?,
        // a time on both sides is not a phrase we understand
        (Some(_), Some(_)) => return None,
    };

    let instant = at_local(reference_now, date.and_time(time))?;
    Some(ResolvedPhrase {
        instant,
        has_date: true,
    })
}

/// "3am", "11:30pm", "23:59", "midnight", "noon".
fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    match s {
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        _ => {}
    }

    if let Some(caps) = AMPM_TIME_RE.captures(s) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if hour == 0 || hour > 12 {
            return None;
        }
        let hour = match (&caps[3], hour) {
            ("am", 12) => 0,
            ("am", h) => h,
            ("pm", 12) => 12,
            ("pm", h) => h + 12,
            _ => return None,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    if let Some(caps) = CLOCK_TIME_RE.captures(s) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    None
}

/// Fixed calendar dates, with or without a clock time. Date-only forms
/// resolve to midnight.
fn resolve_absolute(
    phrase: &str,
    reference_now: DateTime<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(phrase, fmt) {
            return at_local(reference_now, naive);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(phrase, fmt) {
            return at_local(reference_now, date.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}

/// Interpret a naive datetime in the reference now's timezone offset.
fn at_local(
    reference_now: DateTime<FixedOffset>,
    naive: NaiveDateTime,
) -> Option<DateTime<FixedOffset>> {
    naive.and_local_timezone(*reference_now.offset()).single()
}
