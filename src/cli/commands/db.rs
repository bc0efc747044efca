use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{truncate_all, vacuum};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        path,
        vacuum: do_vacuum,
        truncate,
        sqlite_version,
    } = cmd
    else {
        return Ok(());
    };

    if *path {
        println!("{}", cfg.database);
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    if *sqlite_version {
        let version: String = pool
            .conn
            .query_row("SELECT sqlite_version();", [], |row| row.get(0))?;
        println!("SQLite version: {version}");
    } else if *do_vacuum {
        init_db(&pool.conn)?;
        println!("Performing VACUUM...");
        vacuum(&pool.conn)?;
        success("VACUUM complete.");
    } else if *truncate {
        init_db(&pool.conn)?;
        if ask_confirmation("Continue deleting all saved data? There's no going back.") {
            println!("Deleting...");
            truncate_all(&pool.conn)?;
            success("Deletion successful.");
        }
    }

    Ok(())
}
