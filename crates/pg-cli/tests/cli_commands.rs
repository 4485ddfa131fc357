//! Integration tests for the `pg` command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PIKACHU: &str = r#"{
    "id": 25,
    "name": "pikachu",
    "height": 4,
    "weight": 60,
    "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
    "abilities": [{"ability": {"name": "static", "url": ""}, "is_hidden": false, "slot": 1}],
    "stats": [
        {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}},
        {"base_stat": 55, "effort": 0, "stat": {"name": "attack", "url": ""}},
        {"base_stat": 40, "effort": 0, "stat": {"name": "defense", "url": ""}},
        {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": ""}}
    ],
    "sprites": {
        "front_default": "https://example.com/pikachu.png",
        "front_shiny": "https://example.com/pikachu_shiny.png"
    }
}"#;

/// Answer one request per canned `(status, body)` pair, then stop.
/// The handle yields the request lines seen.
fn stub_catalog(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            requests.push(read_request_line(&mut stream));
            let reason = if status == 200 { "OK" } else { "Error" };
            write!(
                stream,
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
        }
        requests
    });
    (format!("http://{addr}/api/v2/pokemon"), handle)
}

fn read_request_line(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&request)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// An address nothing listens on.
fn dead_catalog() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v2/pokemon")
}

fn pokegreet(dir: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("pokegreet").unwrap();
    for var in [
        "POKEGREET_README",
        "POKEGREET_HISTORY",
        "POKEGREET_HISTORY_SIZE",
        "POKEGREET_MAX_ID",
        "POKEGREET_RETRIES",
        "POKEGREET_SEED",
        "RUST_LOG",
        "HTTP_PROXY",
        "http_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir.path())
        .env("POKEGREET_API_URL", api_url)
        .env("POKEGREET_RETRY_DELAY_MS", "0")
        .env("POKEGREET_TIMEOUT_SECS", "5")
        .env("NO_COLOR", "1");
    cmd
}

fn workspace_with_readme() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "yesterday's greeting\n").unwrap();
    dir
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_rewrites_readme_and_records_history() {
    let dir = workspace_with_readme();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url)
        .args(["run", "--max-id", "25", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pikachu"));

    let requests = server.join().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/v2/pokemon/"));

    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("Pikachu"));
    assert!(readme.contains("Electric"));
    assert!(readme.contains("https://example.com/pikachu.png"));
    assert!(!readme.contains("yesterday"));

    let history = fs::read_to_string(dir.path().join("pokemon_history.json")).unwrap();
    assert!(history.contains("\"pokemon_name\": \"Pikachu\""));
}

#[test]
fn run_is_the_default_command() {
    let dir = workspace_with_readme();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url).assert().success();

    server.join().unwrap();
    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("Pikachu"));
}

#[test]
fn run_retries_transient_failures() {
    let dir = workspace_with_readme();
    let (url, server) = stub_catalog(vec![(503, ""), (500, ""), (200, PIKACHU)]);

    pokegreet(&dir, &url)
        .args(["--retries", "3"])
        .assert()
        .success();

    assert_eq!(server.join().unwrap().len(), 3);
}

#[test]
fn run_fails_after_retry_budget_and_leaves_files_alone() {
    let dir = workspace_with_readme();
    fs::write(dir.path().join("pokemon_history.json"), "[1, 2, 3]").unwrap();
    let (url, server) = stub_catalog(vec![(503, ""), (503, "")]);

    pokegreet(&dir, &url)
        .args(["--retries", "2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to fetch"));

    assert_eq!(server.join().unwrap().len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "yesterday's greeting\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("pokemon_history.json")).unwrap(),
        "[1, 2, 3]"
    );
}

#[test]
fn run_fails_when_catalog_is_unreachable() {
    let dir = workspace_with_readme();

    pokegreet(&dir, &dead_catalog())
        .args(["--retries", "1"])
        .assert()
        .failure()
        .code(1);

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "yesterday's greeting\n"
    );
    assert!(!dir.path().join("pokemon_history.json").exists());
}

#[test]
fn run_tolerates_corrupt_history() {
    let dir = workspace_with_readme();
    fs::write(dir.path().join("pokemon_history.json"), "{{ definitely not json").unwrap();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url)
        .assert()
        .success()
        .stderr(predicate::str::contains("corrupt"));

    server.join().unwrap();
    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("Pikachu"));
    let history = fs::read_to_string(dir.path().join("pokemon_history.json")).unwrap();
    assert!(history.contains("Pikachu"));
}

#[test]
fn run_fails_when_readme_unwritable() {
    let dir = TempDir::new().unwrap();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url)
        .args(["--readme", "no/such/dir/README.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot write"));

    server.join().unwrap();
}

#[test]
fn run_reads_paths_from_environment() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("profile")).unwrap();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url)
        .env("POKEGREET_README", "profile/README.md")
        .env("POKEGREET_HISTORY", "state/history.json")
        .assert()
        .success();

    server.join().unwrap();
    assert!(dir.path().join("profile/README.md").exists());
    assert!(dir.path().join("state/history.json").exists());
}

// ---------------------------------------------------------------------------
// preview
// ---------------------------------------------------------------------------

#[test]
fn preview_prints_card_without_writing() {
    let dir = workspace_with_readme();
    let (url, server) = stub_catalog(vec![(200, PIKACHU)]);

    pokegreet(&dir, &url)
        .arg("preview")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<div align=\"center\">")
                .and(predicate::str::contains("Pikachu"))
                .and(predicate::str::contains("Base Stats (Total: 220)")),
        );

    server.join().unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "yesterday's greeting\n"
    );
    assert!(!dir.path().join("pokemon_history.json").exists());
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

#[test]
fn history_lists_recorded_greetings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pokemon_history.json"),
        r#"[
  {"pokemon_id": 25, "pokemon_name": "Pikachu", "types": "Electric", "timestamp": "2025-03-14T09:05:00Z"},
  {"pokemon_id": 1, "pokemon_name": "Bulbasaur", "types": "Grass / Poison"}
]"#,
    )
    .unwrap();

    pokegreet(&dir, &dead_catalog())
        .arg("history")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Pikachu")
                .and(predicate::str::contains("Grass / Poison"))
                .and(predicate::str::contains("2025-03-14 09:05 UTC"))
                .and(predicate::str::contains("2 of 100 entries kept")),
        );
}

#[test]
fn history_empty() {
    let dir = TempDir::new().unwrap();
    pokegreet(&dir, &dead_catalog())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No greetings recorded yet"));
}
