//! Save path: raw input line to a persisted work entry.

use chrono::{DateTime, FixedOffset};

use crate::db::initialize::init_db;
use crate::db::models::WorkEntry;
use crate::db::pool::DbPool;
use crate::db::queries::save_entry;
use crate::errors::{AppError, AppResult};
use crate::parser::InputParser;
use crate::utils::{to_internal, unique_hash};

/// Parse the raw line and store the resulting entry, its tags and their
/// links atomically. `extra_tags` come from the `--tag` option and merge
/// with the inline `#tag` tokens.
pub fn save_work(
    pool: &mut DbPool,
    raw: &str,
    extra_tags: &[String],
    reference_now: DateTime<FixedOffset>,
) -> AppResult<WorkEntry> {
    let parsed = InputParser::new(reference_now).parse(raw)?;

    // Tag names are case-insensitive: stored normalized to lowercase.
    let mut tags: Vec<String> = parsed
        .tags
        .iter()
        .chain(extra_tags)
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();

    let entry = WorkEntry {
        uuid: unique_hash(),
        created: to_internal(reference_now),
        work: parsed.work,
        timestamp: to_internal(parsed.timestamp),
        duration: parsed.duration,
        tags,
    };

    init_db(&pool.conn)?;
    save_entry(&mut pool.conn, &entry).map_err(|e| match e {
        AppError::Db(inner) => AppError::CannotSaveWork(inner.to_string()),
        other => other,
    })?;

    Ok(entry)
}
