use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::save::save_work;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::render::render_entry;
use crate::utils::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { stuff, tags } = cmd {
        let raw = stuff.join(" ");
        let mut pool = DbPool::new(&cfg.database)?;
        let entry = save_work(&mut pool, &raw, tags, now())?;

        println!("Work saved.\n");
        print!("{}", render_entry(&entry, cfg));
    }
    Ok(())
}
