//! Unified application error type.
//! All modules (db, core, parser, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Unable to initialize the database :: {0}")]
    DbInitialization(String),

    // ---------------------------
    // Input parsing errors
    // ---------------------------
    #[error("The provided work text is invalid")]
    InvalidWork,

    #[error("The provided date/time is invalid. Please refer to the docs for valid phrases")]
    InvalidDateTime,

    #[error("The provided date/time is in the future")]
    DateTimeInFuture,

    // ---------------------------
    // Fetch filter errors
    // ---------------------------
    #[error("Please provide a start date/time")]
    StartDateAbsent,

    #[error("The provided start date/time is greater than the end date/time")]
    StartDateGreater,

    #[error("Unable to fetch your work :: {0}")]
    CannotFetchWork(String),

    #[error("Unable to save your work :: {0}")]
    CannotSaveWork(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
