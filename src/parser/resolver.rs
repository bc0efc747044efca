//! Temporal resolver: turns a date phrase into an instant that is
//! guaranteed not to lie in the future of the reference now.

use chrono::{DateTime, Duration, FixedOffset};

use crate::errors::{AppError, AppResult};
use crate::parser::phrase;

/// Resolves date phrases against an explicit reference instant.
///
/// The reference now is fixed at construction so repeated calls within one
/// command observe a single consistent "now".
#[derive(Debug, Clone, Copy)]
pub struct TemporalResolver {
    reference_now: DateTime<FixedOffset>,
}

impl TemporalResolver {
    pub fn new(reference_now: DateTime<FixedOffset>) -> Self {
        Self { reference_now }
    }

    pub fn reference_now(&self) -> DateTime<FixedOffset> {
        self.reference_now
    }

    /// Resolve a phrase to an instant.
    ///
    /// An empty or whitespace-only phrase resolves to the reference now.
    /// A phrase the grammar does not recognize fails with `InvalidDateTime`;
    /// a recognized phrase that lies after the reference now fails with
    /// `DateTimeInFuture`.
    pub fn resolve(&self, phrase: &str) -> AppResult<DateTime<FixedOffset>> {
        let trimmed = phrase.trim();
        if trimmed.is_empty() {
            return Ok(self.reference_now);
        }

        let resolved =
            phrase::try_resolve(trimmed, self.reference_now).ok_or(AppError::InvalidDateTime)?;

        let mut instant = resolved.instant;
        // A time of day with no date means the most recent occurrence of that
        // time: "11:30pm" said at 10am is last night. Applied once, before
        // the future check.
        if !resolved.has_date && instant > self.reference_now {
            instant -= Duration::days(1);
        }

        if instant > self.reference_now {
            return Err(AppError::DateTimeInFuture);
        }
        Ok(instant)
    }
}
