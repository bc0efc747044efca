//! worklog main entrypoint.

use worklog::run;
use worklog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
