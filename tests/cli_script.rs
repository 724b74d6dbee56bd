use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn smartspend(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smartspend_cli").unwrap();
    cmd.env("SMARTSPEND_CLI_SCRIPT", "1")
        .env("SMARTSPEND_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

const ONBOARD: &str = "start\nsignup Ada\nsetup 5000 3000 0 1000 0\n";

#[test]
fn script_mode_runs_budget_flow() {
    let home = TempDir::new().unwrap();
    let input = format!(
        "{ONBOARD}budget add Dining 300 1h\nbudget toggle 1\nspend 1 250\nspend 1 60\nbudget list\nexit\n"
    );

    smartspend(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Budget #1 created"))
        .stdout(contains("Budget #1 activated ("))
        .stdout(contains("Dining budget exceeded by $10.00"))
        .stdout(contains("over budget"));

    assert!(home.path().join("data/profile.json").exists());
}

#[test]
fn demo_scan_reports_shopping_overage() {
    let home = TempDir::new().unwrap();
    let input = format!(
        "{ONBOARD}budget add shopping 500 \"2h 30m\"\nbudget toggle 1\nspend 1 120\nscan\nexit\n"
    );

    smartspend(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Scan: Sony Headphones ($650.00, Shopping)"))
        .stdout(contains("exceed your Shopping budget by $270.00"))
        .stdout(contains("Alert: This purchase exceeds your Shopping limit of $300."));
}

#[test]
fn free_item_can_be_scanned_and_bought() {
    let home = TempDir::new().unwrap();
    let input = format!(
        "{ONBOARD}budget add dining 50 1h\nbudget toggle 1\nscan \"Free sample\" 0 dining\nbuy\nbudget show 1\nexit\n"
    );

    smartspend(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Run `buy` to record this purchase."))
        .stdout(contains("Bought Free sample for $0.00 (Dining)."))
        .stdout(contains("Transactions:"))
        .stdout(contains("[x]").not());
}

#[test]
fn errors_are_reported_and_the_shell_keeps_going() {
    let home = TempDir::new().unwrap();
    let input = "budget list\nbudgte\nstart\nsession\n";

    smartspend(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("That needs the dashboard"))
        .stdout(contains("Suggestion: `budget`?"))
        .stdout(contains("Current step: signup"));
}

#[test]
fn returning_user_lands_on_dashboard() {
    let home = TempDir::new().unwrap();
    smartspend(&home).write_stdin(ONBOARD).assert().success();

    smartspend(&home)
        .write_stdin("start\nsignup\nprofile\n")
        .assert()
        .success()
        .stdout(contains("Welcome back"))
        .stdout(contains("Monthly surplus"))
        .stdout(contains("$2000.00"));
}

#[test]
fn config_changes_are_saved_under_home() {
    let home = TempDir::new().unwrap();
    smartspend(&home)
        .write_stdin("config set currency eur\nconfig set warning_ratio 2\nconfig show\n")
        .assert()
        .success()
        .stdout(contains("Updated `currency`."))
        .stdout(contains("currency                 : EUR"))
        .stdout(contains("warning_ratio").and(contains("expected a ratio")));

    let stored = std::fs::read_to_string(home.path().join("config/config.json")).unwrap();
    assert!(stored.contains("\"EUR\""));
}

#[test]
fn version_prints_build_metadata() {
    let home = TempDir::new().unwrap();
    smartspend(&home)
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains("SmartSpend").and(contains("Build hash")));
}
