//! SQL for the work log: saving entries, fetching with filters,
//! deleting and maintenance.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params, params_from_iter};

use crate::db::models::{Tag, WorkEntry, map_tag_row, map_work_row};
use crate::errors::AppResult;
use crate::utils::{format_internal, unique_hash};

/// Filters for the fetch path. `work_id` short-circuits everything else;
/// the duration predicate is applied by the caller on the result set.
#[derive(Debug, Clone, Default)]
pub struct WorkFilters {
    pub work_id: Option<String>,
    /// OR semantics: an entry matches when it carries any of these names.
    pub tags: Vec<String>,
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub reverse: bool,
    pub limit: Option<i64>,
}

/// Insert one entry with its tags and links in a single transaction:
/// either everything commits or nothing does.
pub fn save_entry(conn: &mut Connection, entry: &WorkEntry) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO work (uuid, created, work, timestamp, duration)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.uuid,
            format_internal(entry.created),
            entry.work,
            format_internal(entry.timestamp),
            entry.duration,
        ],
    )?;

    for name in &entry.tags {
        let tag_uuid = get_or_create_tag(&tx, name, entry.created)?;
        tx.execute(
            "INSERT OR IGNORE INTO work_tag (work, tag) VALUES (?1, ?2)",
            params![entry.uuid, tag_uuid],
        )?;
    }

    tx.commit()?;
    Ok(())
}

fn get_or_create_tag(
    conn: &Connection,
    name: &str,
    created: DateTime<Utc>,
) -> rusqlite::Result<String> {
    let existing: Option<String> = conn
        .query_row("SELECT uuid FROM tag WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })?;

    if let Some(uuid) = existing {
        return Ok(uuid);
    }

    let uuid = unique_hash();
    conn.execute(
        "INSERT INTO tag (uuid, name, created) VALUES (?1, ?2, ?3)",
        params![uuid, name, format_internal(created)],
    )?;
    Ok(uuid)
}

/// Fetch entries matching the filters, tags attached, ordered by
/// occurred-at (descending unless `reverse`).
pub fn fetch_entries(conn: &Connection, filters: &WorkFilters) -> AppResult<Vec<WorkEntry>> {
    let mut sql = String::from("SELECT uuid, created, work, timestamp, duration FROM work");
    let mut args: Vec<String> = Vec::new();
    let mut clauses: Vec<String> = Vec::new();

    if let Some(id) = &filters.work_id {
        clauses.push("uuid = ?".into());
        args.push(id.clone());
    } else {
        if !filters.tags.is_empty() {
            let placeholders = vec!["?"; filters.tags.len()].join(", ");
            clauses.push(format!(
                "uuid IN (SELECT wt.work FROM work_tag wt \
                 JOIN tag t ON t.uuid = wt.tag WHERE t.name IN ({placeholders}))"
            ));
            args.extend(filters.tags.iter().cloned());
        }
        if let Some((start, end)) = filters.range {
            clauses.push("timestamp BETWEEN ? AND ?".into());
            args.push(format_internal(start));
            args.push(format_internal(end));
        }
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    if filters.work_id.is_none() {
        sql.push_str(if filters.reverse {
            " ORDER BY timestamp ASC"
        } else {
            " ORDER BY timestamp DESC"
        });
        if let Some(limit) = filters.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_work_row)?;

    let mut entries = Vec::new();
    for row in rows {
        let mut entry = row?;
        entry.tags = tags_for_entry(conn, &entry.uuid)?;
        entries.push(entry);
    }
    Ok(entries)
}

fn tags_for_entry(conn: &Connection, work_uuid: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.name FROM work_tag wt
         JOIN tag t ON t.uuid = wt.tag
         WHERE wt.work = ?1
         ORDER BY t.name ASC",
    )?;
    let rows = stmt.query_map([work_uuid], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for r in rows {
        names.push(r?);
    }
    Ok(names)
}

/// Delete the given entries; links go with them via the cascade.
pub fn delete_entries(conn: &Connection, uuids: &[String]) -> AppResult<usize> {
    if uuids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; uuids.len()].join(", ");
    let deleted = conn.execute(
        &format!("DELETE FROM work WHERE uuid IN ({placeholders})"),
        params_from_iter(uuids.iter()),
    )?;
    Ok(deleted)
}

/// All saved tags, alphabetically.
pub fn list_tags(conn: &Connection) -> AppResult<Vec<Tag>> {
    let mut stmt = conn.prepare("SELECT uuid, name, created FROM tag ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_tag_row)?;

    let mut tags = Vec::new();
    for r in rows {
        tags.push(r?);
    }
    Ok(tags)
}

/// Delete all data since the beginning of time.
pub fn truncate_all(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        DELETE FROM work_tag;
        DELETE FROM tag;
        DELETE FROM work;
        "#,
    )?;
    Ok(())
}

/// Reclaim free pages.
pub fn vacuum(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("VACUUM;")?;
    Ok(())
}
