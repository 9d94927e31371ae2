//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `faranga` binary. Farm-record and
//! language tests run fully offline against a temp data directory;
//! network-path tests point `FARANGA_API_URL` at a port with nothing
//! listening.

use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A Command for the `faranga` binary rooted at a temp data dir.
fn faranga(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("faranga").expect("faranga binary");
    cmd.env("FARANGA_DATA_DIR", data_dir.path());
    cmd
}

/// A base URL with nothing listening behind it.
fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api")
}

// ──────────────────────────────────────────────
// Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    let tmp = TempDir::new().expect("tempdir");
    faranga(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Faranga loan-platform client"));
}

#[test]
fn version_exits_0() {
    let tmp = TempDir::new().expect("tempdir");
    faranga(&tmp).arg("--version").assert().success();
}

// ──────────────────────────────────────────────
// Farm records (offline)
// ──────────────────────────────────────────────

#[test]
fn farm_add_then_list_survives_a_new_process() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args([
            "farm",
            "add-employee",
            "Jean Bosco",
            "--role",
            "picker",
            "--pay-amount",
            "45000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added record"));

    // A second process is a "reload": the list must come back from disk.
    faranga(&tmp)
        .args(["farm", "list", "employees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jean Bosco"))
        .stdout(predicate::str::contains("1 record(s)"));
}

#[test]
fn farm_add_with_blank_name_is_rejected_and_stores_nothing() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args(["farm", "add-employee", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("full name is required"));

    faranga(&tmp)
        .args(["farm", "list", "employees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 record(s)"));
}

#[test]
fn farm_export_writes_quoted_csv() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args([
            "farm",
            "add-employee",
            "Jean \"JB\" Bosco, Sr.",
            "--pay-frequency",
            "monthly",
        ])
        .assert()
        .success();

    let out = tmp.path().join("export.csv");
    faranga(&tmp)
        .args(["farm", "export", "employees", "--out"])
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).expect("read export");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"Section\",\"Name\",\"Role\",\"Start date\",\"Pay frequency\",\"Pay amount (RWF)\""
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Jean \"\"JB\"\" Bosco, Sr.\""));
    assert!(row.contains("\"monthly\""));
}

#[test]
fn farm_export_of_empty_section_is_header_only() {
    let tmp = TempDir::new().expect("tempdir");
    let out = tmp.path().join("seeds.csv");

    faranga(&tmp)
        .args(["farm", "export", "seeds", "--out"])
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).expect("read export");
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("\"Section\",\"Name\",\"Variety\""));
}

#[test]
fn farm_sections_do_not_interfere() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args(["farm", "add-seed", "Maize hybrid", "--quantity", "40"])
        .assert()
        .success();

    faranga(&tmp)
        .args(["farm", "list", "employees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 record(s)"));

    faranga(&tmp)
        .args(["farm", "list", "seeds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maize hybrid"));
}

#[test]
fn farm_list_json_output_is_parsable() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args(["farm", "add-fertilizer", "NPK 17-17-17", "--crop", "maize"])
        .assert()
        .success();

    let output = faranga(&tmp)
        .args(["farm", "list", "fertilizers", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let records: serde_json::Value =
        serde_json::from_slice(&output).expect("json output parses");
    assert_eq!(records.as_array().map(|a| a.len()), Some(1));
    assert_eq!(records[0]["fertilizer_name"], "NPK 17-17-17");
}

// ──────────────────────────────────────────────
// Language selection (offline)
// ──────────────────────────────────────────────

#[test]
fn lang_set_then_show_round_trips() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .args(["lang", "set", "FR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fr"));

    faranga(&tmp)
        .args(["lang", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fr"));
}

#[test]
fn unknown_language_falls_back_to_english() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp).args(["lang", "set", "de"]).assert().success();
    faranga(&tmp)
        .args(["lang", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en"));
}

// ──────────────────────────────────────────────
// Network failure paths
// ──────────────────────────────────────────────

#[test]
fn login_against_dead_server_shows_the_network_message() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .env("FARANGA_API_URL", dead_base_url())
        .args(["login", "jean@example.com", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not reach the server"));
}

#[test]
fn network_message_follows_the_stored_language() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp).args(["lang", "set", "fr"]).assert().success();
    faranga(&tmp)
        .env("FARANGA_API_URL", dead_base_url())
        .args(["login", "jean@example.com", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Impossible de joindre le serveur"));
}

// ──────────────────────────────────────────────
// Session state
// ──────────────────────────────────────────────

#[test]
fn whoami_when_logged_out_points_at_login() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("faranga login"));
}

#[test]
fn admin_console_url_derives_from_the_api_override() {
    let tmp = TempDir::new().expect("tempdir");

    faranga(&tmp)
        .env("FARANGA_API_URL", "https://api.example.com/api")
        .args(["admin", "console"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.example.com/admin/"));

    faranga(&tmp)
        .env("FARANGA_API_URL", "https://api.example.com/api")
        .env("FARANGA_BACKEND_URL", "https://console.example.com")
        .args(["admin", "console"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://console.example.com/admin/"));
}

#[test]
fn logout_without_a_session_still_succeeds() {
    let tmp = TempDir::new().expect("tempdir");
    faranga(&tmp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));
}
