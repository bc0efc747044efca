use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::fetch::{FetchRequest, fetch_work};
use crate::core::filters::{FetchRange, Period};
use crate::db::pool::DbPool;
use crate::db::queries::delete_entries;
use crate::errors::AppResult;
use crate::ui::render::{render_entry, render_entry_text};
use crate::utils::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::What {
        count,
        last,
        work_id,
        start,
        end,
        since,
        past_day,
        past_week,
        past_month,
        past_year,
        yesterday,
        today,
        on,
        at,
        tags,
        duration,
        reverse,
        text_only,
        delete,
    } = cmd
    else {
        return Ok(());
    };

    let period = select_period(*yesterday, *today, *past_day, *past_week, *past_month, *past_year);

    let count = if count.is_none() && *last {
        Some(1)
    } else {
        *count
    };

    let request = FetchRequest {
        count,
        work_id: work_id.clone(),
        range: FetchRange {
            start: start.clone(),
            end: end.clone(),
            since: since.clone(),
            period,
            on: on.clone(),
            at: at.clone(),
        },
        tags: tags.clone(),
        duration: duration.clone(),
        reverse: *reverse,
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let entries = fetch_work(&mut pool, &request, now())?;

    if *delete {
        if entries.is_empty() {
            println!("Nothing to delete.");
        } else if ask_confirmation(&format!("Continue deleting {} log(s)?", entries.len())) {
            println!("Deleting...");
            let ids: Vec<String> = entries.iter().map(|e| e.uuid.clone()).collect();
            let deleted = delete_entries(&pool.conn, &ids)?;
            println!("{deleted} log(s) deleted successfully.");
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("Nothing to show, slacker.");
        return Ok(());
    }

    for entry in &entries {
        if *text_only {
            print!("{}", render_entry_text(entry));
        } else {
            print!("{}", render_entry(entry, cfg));
        }
    }
    Ok(())
}

/// Map the period flags to one named period. When several are set the
/// most specific wins.
fn select_period(
    yesterday: bool,
    today: bool,
    past_day: bool,
    past_week: bool,
    past_month: bool,
    past_year: bool,
) -> Option<Period> {
    if yesterday {
        Some(Period::Yesterday)
    } else if today {
        Some(Period::Today)
    } else if past_day {
        Some(Period::Day)
    } else if past_week {
        Some(Period::Week)
    } else if past_month {
        Some(Period::Month)
    } else if past_year {
        Some(Period::Year)
    } else {
        None
    }
}
