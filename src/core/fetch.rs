//! Fetch path: retrieval options to a filtered result set.

use chrono::{DateTime, FixedOffset};

use crate::core::filters::{DurationFilter, FetchRange, resolve_range};
use crate::db::initialize::init_db;
use crate::db::models::WorkEntry;
use crate::db::pool::DbPool;
use crate::db::queries::{WorkFilters, fetch_entries};
use crate::errors::{AppError, AppResult};
use crate::parser::TemporalResolver;

/// Everything the fetch path accepts from the caller.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    pub count: Option<i64>,
    pub work_id: String,
    pub range: FetchRange,
    /// OR semantics: entries carrying any of these tags match.
    pub tags: Vec<String>,
    /// Raw duration filter expression, e.g. ">=2h".
    pub duration: Option<String>,
    pub reverse: bool,
}

/// Fetch saved work filtered by id, or by time range, tag set and
/// duration predicate.
pub fn fetch_work(
    pool: &mut DbPool,
    request: &FetchRequest,
    reference_now: DateTime<FixedOffset>,
) -> AppResult<Vec<WorkEntry>> {
    if let Some(count) = request.count
        && count <= 0
    {
        return Err(AppError::CannotFetchWork(
            "count must be a positive number".into(),
        ));
    }

    let duration_filter = request
        .duration
        .as_deref()
        .map(DurationFilter::compile)
        .transpose()?;

    let filters = if request.work_id.is_empty() {
        let resolver = TemporalResolver::new(reference_now);
        let (start, end) = resolve_range(&request.range, &resolver)?;
        WorkFilters {
            work_id: None,
            tags: request.tags.iter().map(|t| t.to_lowercase()).collect(),
            range: Some((start, end)),
            reverse: request.reverse,
            // the duration predicate runs in memory after the query, so
            // the count caps the result only once that predicate has run
            limit: if duration_filter.is_some() {
                None
            } else {
                request.count
            },
        }
    } else {
        WorkFilters {
            work_id: Some(request.work_id.clone()),
            ..WorkFilters::default()
        }
    };

    init_db(&pool.conn)?;
    let mut entries = fetch_entries(&pool.conn, &filters).map_err(|e| match e {
        AppError::Db(inner) => AppError::CannotFetchWork(inner.to_string()),
        other => other,
    })?;

    if let Some(filter) = duration_filter {
        entries.retain(|e| e.duration.is_some_and(|d| filter.matches(d)));
        if let Some(count) = request.count {
            entries.truncate(count as usize);
        }
    }

    Ok(entries)
}
