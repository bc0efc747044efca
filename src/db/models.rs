//! Persisted record types and row mapping.

use chrono::{DateTime, Utc};
use rusqlite::{Result, Row};

use crate::errors::AppError;
use crate::utils::parse_internal;

/// One immutable logged record of completed work.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkEntry {
    pub uuid: String,
    pub created: DateTime<Utc>,
    pub work: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Option<f64>,
    /// Tag names, already normalized to lowercase.
    pub tags: Vec<String>,
}

/// A tag in the saved vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub uuid: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

fn timestamp_column(row: &Row, idx: usize) -> Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_internal(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::DbInitialization(format!(
                "Invalid stored timestamp: {raw}"
            ))),
        )
    })
}

/// Map a `work` row (uuid, created, work, timestamp, duration). Tags are
/// attached by a separate query.
pub fn map_work_row(row: &Row) -> Result<WorkEntry> {
    Ok(WorkEntry {
        uuid: row.get(0)?,
        created: timestamp_column(row, 1)?,
        work: row.get(2)?,
        timestamp: timestamp_column(row, 3)?,
        duration: row.get(4)?,
        tags: Vec::new(),
    })
}

/// Map a `tag` row (uuid, name, created).
pub fn map_tag_row(row: &Row) -> Result<Tag> {
    Ok(Tag {
        uuid: row.get(0)?,
        name: row.get(1)?,
        created: timestamp_column(row, 2)?,
    })
}
