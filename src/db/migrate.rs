//! Schema migration engine.
//!
//! The persisted layout is versioned through SQLite's `user_version`
//! pragma, starting at 0 on a brand-new store. Upgrades form a linear
//! state machine: an ordered list of transitions, each bumping the
//! version by exactly one together with its DDL. Versions only increase.

use rusqlite::Connection;

use crate::errors::{AppError, AppResult};

/// Target schema version for this build.
pub const CURRENT_DB_VERSION: i64 = 3;

struct Transition {
    from: i64,
    to: i64,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

/// Strictly ordered transition table. Fresh stores (version 0) skip it
/// and are created directly at the target version.
const TRANSITIONS: &[Transition] = &[
    Transition {
        from: 1,
        to: 2,
        apply: migrate_v1_to_v2,
    },
    Transition {
        from: 2,
        to: 3,
        apply: migrate_v2_to_v3,
    },
];

fn user_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

fn set_user_version(conn: &Connection, version: i64) -> rusqlite::Result<()> {
    conn.pragma_update(None, "user_version", version)
}

/// Create all tables at the current layout in one shot (fresh install).
fn create_initial_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work (
            uuid      TEXT PRIMARY KEY NOT NULL,
            created   TEXT NOT NULL,
            work      TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            duration  REAL
        );

        CREATE INDEX IF NOT EXISTS idx_work_timestamp ON work(timestamp);

        CREATE TABLE IF NOT EXISTS tag (
            uuid    TEXT NOT NULL UNIQUE,
            name    TEXT PRIMARY KEY NOT NULL,
            created TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS work_tag (
            work TEXT NOT NULL REFERENCES work(uuid) ON DELETE CASCADE,
            tag  TEXT NOT NULL REFERENCES tag(uuid),
            PRIMARY KEY (work, tag)
        );

        CREATE INDEX IF NOT EXISTS idx_work_duration ON work(duration);
        "#,
    )?;
    set_user_version(conn, CURRENT_DB_VERSION)
}

/// v1 → v2: add the tag vocabulary, the work/tag link table and a nullable
/// duration column on the work table.
fn migrate_v1_to_v2(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tag (
            uuid    TEXT NOT NULL UNIQUE,
            name    TEXT PRIMARY KEY NOT NULL,
            created TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS work_tag (
            work TEXT NOT NULL REFERENCES work(uuid) ON DELETE CASCADE,
            tag  TEXT NOT NULL REFERENCES tag(uuid),
            PRIMARY KEY (work, tag)
        );

        ALTER TABLE work ADD COLUMN duration REAL;
        "#,
    )?;
    set_user_version(conn, 2)
}

/// v2 → v3: index the duration column for the fetch-side filter.
fn migrate_v2_to_v3(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_work_duration ON work(duration);")?;
    set_user_version(conn, 3)
}

/// Bring the on-disk schema up to `CURRENT_DB_VERSION`.
///
/// Runs before any other read or write on the connection. Storage errors
/// during a transition are wrapped into `DbInitialization` with the
/// original message; migrations are never retried.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let result: rusqlite::Result<()> = (|| {
        let mut version = user_version(conn)?;

        // fresh new install
        if version == 0 {
            create_initial_tables(conn)?;
            version = user_version(conn)?;
        }

        for transition in TRANSITIONS {
            if version >= CURRENT_DB_VERSION {
                break;
            }
            if transition.from == version {
                (transition.apply)(conn)?;
                version = user_version(conn)?;
                debug_assert_eq!(version, transition.to);
            }
        }
        Ok(())
    })();

    result.map_err(|e| AppError::DbInitialization(e.to_string()))?;

    // Defends against a transition that updates the schema but forgets to
    // bump the version, or vice versa.
    let version =
        user_version(conn).map_err(|e| AppError::DbInitialization(e.to_string()))?;
    if version != CURRENT_DB_VERSION {
        return Err(AppError::DbInitialization(format!(
            "schema mismatch after migration: expected {CURRENT_DB_VERSION}, found {version}"
        )));
    }
    Ok(())
}
