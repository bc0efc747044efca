//! End-to-end CLI tests against throwaway SQLite databases.

use predicates::prelude::*;

mod common;
use common::{extract_id, save_entry, setup_test_db, strip_ansi, wl};

#[test]
fn test_log_and_fetch_roundtrip() {
    let db = setup_test_db("roundtrip");

    let stdout = save_entry(&db, &["writing", "release", "notes", "#docs", "[1.5h]"]);
    assert!(stdout.contains("Work saved."));

    let assert = wl().args(["--db", &db, "what"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("writing release notes"));
    assert!(out.contains("Tags: docs"));
    assert!(out.contains("Duration: 90 min"));
    // extracted tokens never leak into the stored text
    assert!(!out.contains("#docs"));
    assert!(!out.contains("[1.5h]"));
}

#[test]
fn test_log_merges_flag_tags_lowercased() {
    let db = setup_test_db("flag_tags");

    save_entry(&db, &["pairing", "session", "#Backend", "--tag", "URGENT"]);

    let assert = wl().args(["--db", &db, "what"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("Tags: backend, urgent"));
}

#[test]
fn test_log_with_past_date_phrase() {
    let db = setup_test_db("past_phrase");

    save_entry(&db, &["studying", "for", "the", "SAT", "@", "June", "23", "2010"]);

    // outside the default week window
    wl().args(["--db", &db, "what"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show, slacker."));

    // reachable with an explicit start
    let assert = wl()
        .args(["--db", &db, "what", "-f", "June 1 2010", "-t", "July 1 2010"])
        .assert()
        .success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("studying for the SAT"));
}

#[test]
fn test_log_rejects_empty_work_text() {
    let db = setup_test_db("empty_work");

    wl().args(["--db", &db, "log", "@", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The provided work text is invalid"));
}

#[test]
fn test_log_rejects_future_date() {
    let db = setup_test_db("future_date");

    wl().args(["--db", &db, "log", "planning", "the", "offsite", "@", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The provided date/time is in the future"));
}

#[test]
fn test_log_rejects_gibberish_date() {
    let db = setup_test_db("bad_date");

    wl().args(["--db", &db, "log", "something", "@", "blursday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The provided date/time is invalid"));
}

#[test]
fn test_tag_filter_uses_or_semantics() {
    let db = setup_test_db("tag_or");

    save_entry(&db, &["api", "cleanup", "#backend"]);
    save_entry(&db, &["styling", "pass", "#frontend"]);
    save_entry(&db, &["standup", "notes", "#meetings"]);

    let assert = wl()
        .args(["--db", &db, "what", "--tag", "backend", "--tag", "frontend", "-l"])
        .assert()
        .success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("api cleanup"));
    assert!(out.contains("styling pass"));
    assert!(!out.contains("standup notes"));
}

#[test]
fn test_duration_filter() {
    let db = setup_test_db("duration_filter");

    save_entry(&db, &["long", "refactor", "[2h]"]);
    save_entry(&db, &["quick", "fix", "[30m]"]);
    save_entry(&db, &["untimed", "chores"]);

    let assert = wl()
        .args(["--db", &db, "what", "--duration", ">=1h", "-l"])
        .assert()
        .success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("long refactor"));
    assert!(!out.contains("quick fix"));
    // entries without a duration never match a duration filter
    assert!(!out.contains("untimed chores"));
}

#[test]
fn test_count_caps_after_duration_filter() {
    let db = setup_test_db("count_after_duration");

    save_entry(&db, &["short", "task", "[30m]", "@", "1 hour ago"]);
    save_entry(&db, &["medium", "task", "[2h]", "@", "2 hours ago"]);
    save_entry(&db, &["big", "task", "[3h]", "@", "3 hours ago"]);

    // the newest entry fails the filter; the count must still be filled
    // from matching entries further back
    let assert = wl()
        .args(["--db", &db, "what", "-n", "2", "--duration", ">=1h", "-l"])
        .assert()
        .success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("medium task"));
    assert!(out.contains("big task"));
    assert!(!out.contains("short task"));
}

#[test]
fn test_invalid_duration_filter_fails() {
    let db = setup_test_db("bad_duration_filter");

    wl().args(["--db", &db, "what", "--duration", "3hors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to fetch your work :: Invalid duration filter",
        ));

    wl().args(["--db", &db, "what", "--duration", "<>2h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to fetch your work :: Invalid duration operator",
        ));
}

#[test]
fn test_fetch_by_id() {
    let db = setup_test_db("fetch_by_id");

    let stdout = save_entry(&db, &["debugging", "the", "flaky", "test"]);
    let id = extract_id(&stdout);
    save_entry(&db, &["something", "else"]);

    let assert = wl().args(["--db", &db, "what", "-i", &id]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("debugging the flaky test"));
    assert!(!out.contains("something else"));
}

#[test]
fn test_fetch_at_exact_time() {
    let db = setup_test_db("fetch_at");

    save_entry(&db, &["deploying", "v2", "@", "3pm", "yesterday"]);
    save_entry(&db, &["unrelated", "work"]);

    let assert = wl()
        .args(["--db", &db, "what", "--at", "3pm yesterday", "-l"])
        .assert()
        .success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("deploying v2"));
    assert!(!out.contains("unrelated work"));
}

#[test]
fn test_last_returns_single_entry() {
    let db = setup_test_db("last_entry");

    save_entry(&db, &["first", "thing", "@", "2 hours ago"]);
    save_entry(&db, &["latest", "thing", "@", "5 minutes ago"]);

    let assert = wl().args(["--db", &db, "what", "-s", "-l"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("latest thing"));
    assert!(!out.contains("first thing"));
}

#[test]
fn test_reverse_orders_oldest_first() {
    let db = setup_test_db("reverse_order");

    save_entry(&db, &["older", "entry", "@", "2 hours ago"]);
    save_entry(&db, &["newer", "entry", "@", "5 minutes ago"]);

    let assert = wl().args(["--db", &db, "what", "-r", "-l"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    let older = out.find("older entry").expect("older entry missing");
    let newer = out.find("newer entry").expect("newer entry missing");
    assert!(older < newer);
}

#[test]
fn test_nonpositive_count_is_rejected() {
    let db = setup_test_db("bad_count");

    wl().args(["--db", &db, "what", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to fetch your work :: count must be a positive number",
        ));
}

#[test]
fn test_end_without_start_is_rejected() {
    let db = setup_test_db("end_only");

    wl().args(["--db", &db, "what", "-t", "today"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide a start date/time"));
}

#[test]
fn test_delete_fetched_work() {
    let db = setup_test_db("delete_work");

    save_entry(&db, &["doomed", "entry"]);

    wl().args(["--db", &db, "what", "--delete"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 log(s) deleted successfully."));

    wl().args(["--db", &db, "what"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show, slacker."));
}

#[test]
fn test_delete_declined_keeps_work() {
    let db = setup_test_db("delete_declined");

    save_entry(&db, &["spared", "entry"]);

    wl().args(["--db", &db, "what", "--delete"])
        .write_stdin("n\n")
        .assert()
        .success();

    let assert = wl().args(["--db", &db, "what", "-l"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(out.contains("spared entry"));
}

#[test]
fn test_delete_with_nothing_to_delete() {
    let db = setup_test_db("delete_empty");

    wl().args(["--db", &db, "what", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to delete."));
}

#[test]
fn test_tags_subcommand_lists_saved_tags() {
    let db = setup_test_db("tags_list");

    save_entry(&db, &["work", "one", "#Zeta", "#alpha"]);

    let assert = wl().args(["--db", &db, "tags"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    let alpha = out.find("* alpha").expect("alpha tag missing");
    let zeta = out.find("* zeta").expect("zeta tag missing");
    assert!(alpha < zeta);
}

#[test]
fn test_db_path_prints_database_location() {
    let db = setup_test_db("db_path");

    wl().args(["--db", &db, "db", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&db));
}

#[test]
fn test_db_sqlite_version() {
    let db = setup_test_db("db_version");

    wl().args(["--db", &db, "db", "--sqlite-version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SQLite version: 3."));
}

#[test]
fn test_db_truncate_removes_everything() {
    let db = setup_test_db("db_truncate");

    save_entry(&db, &["about", "to", "vanish", "#gone"]);

    wl().args(["--db", &db, "db", "--truncate"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion successful."));

    wl().args(["--db", &db, "what"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show, slacker."));

    let assert = wl().args(["--db", &db, "tags"]).assert().success();
    let out = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
    assert!(!out.contains("gone"));
}
