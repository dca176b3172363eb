use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ROTATE_ABOVE: usize = 5 * 1024 * 1024;

fn marquee(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("marquee").expect("marquee binary");
    cmd.env_clear().current_dir(cwd.path());
    cmd
}

/// Complete configuration pointing every service at a closed local port.
fn unreachable_env(cmd: &mut Command, log_path: &std::path::Path) {
    cmd.env("TMDB_API_KEY", "tmdb-key")
        .env("RADARR_URL", "http://127.0.0.1:1")
        .env("RADARR_API_KEY", "radarr-key")
        .env("JUSTWATCH_LIST_ID", "tl-us-0001")
        .env("JUSTWATCH_HOME_URL", "http://127.0.0.1:1/")
        .env("JUSTWATCH_GRAPHQL_URL", "http://127.0.0.1:1/graphql")
        .env("TMDB_BASE_URL", "http://127.0.0.1:1/3")
        .env("LOGFILE_PATH", log_path);
}

#[test]
fn missing_configuration_exits_one() {
    let cwd = TempDir::new().unwrap();
    marquee(&cwd)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Sync failed"))
        .stderr(predicate::str::contains("missing required environment variable"));
}

#[test]
fn missing_env_file_exits_one() {
    let cwd = TempDir::new().unwrap();
    marquee(&cwd)
        .arg("--env-file")
        .arg(cwd.path().join("nope.env"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load env file"));
}

#[test]
fn env_file_values_are_loaded() {
    let cwd = TempDir::new().unwrap();
    fs::write(
        cwd.path().join("marquee.env"),
        "TMDB_API_KEY=k\nRADARR_URL=http://127.0.0.1:1\nRADARR_API_KEY=k\n\
         JUSTWATCH_LIST_ID=tl\nRADARR_QUALITY_PROFILE_ID=hd\n",
    )
    .unwrap();

    // The bad profile id proves the file was read past the required keys.
    marquee(&cwd)
        .arg("--env-file")
        .arg(cwd.path().join("marquee.env"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("RADARR_QUALITY_PROFILE_ID"));
}

#[test]
fn unreachable_watchlist_rotates_log_then_exits_one() {
    let cwd = TempDir::new().unwrap();
    let log = cwd.path().join("sync.log");
    let backup = cwd.path().join("sync.log.old");
    fs::write(&log, vec![b'x'; ROTATE_ABOVE + 1]).unwrap();
    fs::write(&backup, "stale generation").unwrap();

    let mut cmd = marquee(&cwd);
    unreachable_env(&mut cmd, &log);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Sync failed: JustWatch request failed"));

    assert_eq!(fs::metadata(&backup).unwrap().len(), ROTATE_ABOVE as u64 + 1);
    let fresh = fs::read_to_string(&log).expect("log recreated by the subscriber");
    assert!(fresh.contains("sync aborted during fetch"), "log: {fresh}");
}

#[test]
fn small_log_is_appended_not_rotated() {
    let cwd = TempDir::new().unwrap();
    let log = cwd.path().join("sync.log");
    fs::write(&log, "earlier run\n").unwrap();

    let mut cmd = marquee(&cwd);
    unreachable_env(&mut cmd, &log);
    cmd.assert().code(1);

    assert!(!cwd.path().join("sync.log.old").exists());
    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.starts_with("earlier run\n"));
    assert!(contents.contains("sync aborted during fetch"));
}
