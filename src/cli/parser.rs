use clap::{Parser, Subcommand};

/// Command-line interface definition for worklog
/// Work tracking from your shell, backed by SQLite
#[derive(Parser)]
#[command(
    name = "worklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log what you worked on and fetch it back by time, tag or duration",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log what you worked on, with optional "@ <date phrase>" suffix
    ///
    /// Examples:
    ///   worklog log painting the garage
    ///   worklog log studying for the SAT @ June 23 2010
    ///   worklog log fixing the build [45m] #ci @ 2pm yesterday
    Log {
        /// What you worked on
        #[arg(required = true, num_args = 1.., value_name = "WHAT_YOU_WORKED_ON")]
        stuff: Vec<String>,

        /// Tag to add to your work log (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Fetch and display logged work
    ///
    /// If no options are provided, work from the past week is returned.
    What {
        /// Number of entries to return
        #[arg(short = 'n', long = "count")]
        count: Option<i64>,

        /// Fetch the last thing you worked on
        #[arg(short = 's', long = "last", default_value_t = false)]
        last: bool,

        /// id to fetch with
        #[arg(short = 'i', long = "id", default_value = "")]
        work_id: String,

        /// Start date-time to filter with
        #[arg(short = 'f', long = "from", default_value = "")]
        start: String,

        /// End date-time to filter with
        #[arg(short = 't', long = "to", default_value = "")]
        end: String,

        /// Fetch work done since a specified date-time in the past
        #[arg(long = "since", default_value = "")]
        since: String,

        /// Fetch work done in the past 24 hours
        #[arg(short = 'd', long = "past-day", default_value_t = false)]
        past_day: bool,

        /// Fetch work done in the past week
        #[arg(short = 'w', long = "past-week", default_value_t = false)]
        past_week: bool,

        /// Fetch work done in the past month
        #[arg(short = 'm', long = "past-month", default_value_t = false)]
        past_month: bool,

        /// Fetch work done in the past year
        #[arg(short = 'y', long = "past-year", default_value_t = false)]
        past_year: bool,

        /// Fetch work done yesterday
        #[arg(short = 'e', long = "yesterday", default_value_t = false)]
        yesterday: bool,

        /// Fetch work done today
        #[arg(short = 'o', long = "today", default_value_t = false)]
        today: bool,

        /// Fetch work done on a particular date/day
        #[arg(long = "on")]
        on: Option<String>,

        /// Fetch work done at a particular time on a particular date/day
        #[arg(long = "at")]
        at: Option<String>,

        /// Tag to filter by (repeatable; entries with any given tag match)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Duration filter, e.g. ">=2h" or "90m"
        #[arg(long = "duration")]
        duration: Option<String>,

        /// Reverse order while sorting
        #[arg(short = 'r', long = "reverse", default_value_t = false)]
        reverse: bool,

        /// Output the work log text only
        #[arg(short = 'l', long = "text-only", default_value_t = false)]
        text_only: bool,

        /// Delete fetched work
        #[arg(long = "delete", default_value_t = false)]
        delete: bool,
    },

    /// Print all saved tags
    Tags,

    /// Manage the database (maintenance operations)
    Db {
        #[arg(long = "path", help = "Print the location of the database file")]
        path: bool,

        #[arg(long = "vacuum", help = "Reclaim free space with VACUUM")]
        vacuum: bool,

        #[arg(long = "truncate", help = "Delete all data since the beginning of time")]
        truncate: bool,

        #[arg(long = "sqlite-version", help = "Print the version of SQLite being used")]
        sqlite_version: bool,
    },
}
