#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn wl() -> Command {
    cargo_bin_cmd!("worklog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worklog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Save one entry through the CLI and return the raw stdout.
pub fn save_entry(db_path: &str, words: &[&str]) -> String {
    let mut args = vec!["--db", db_path, "log"];
    args.extend(words);
    let assert = wl().args(&args).assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

/// Pull the entry id out of the colored "id: <hash>" line of a save.
pub fn extract_id(stdout: &str) -> String {
    let stripped = strip_ansi(stdout);
    let line = stripped
        .lines()
        .find(|l| l.starts_with("id: "))
        .expect("no id line in output");
    line.trim_start_matches("id: ").trim().to_string()
}

pub fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*m").unwrap();
    re.replace_all(s, "").into_owned()
}
