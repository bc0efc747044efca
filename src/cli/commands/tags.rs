use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::list_tags;
use crate::errors::AppResult;
use crate::ui::render::render_tag;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tags = cmd {
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        for tag in list_tags(&pool.conn)? {
            print!("{}", render_tag(&tag));
        }
    }
    Ok(())
}
