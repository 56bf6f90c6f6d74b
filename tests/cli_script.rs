use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn shell(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("financas_cli").unwrap();
    cmd.env("FINANCAS_CLI_SCRIPT", "1")
        .env("FINANCAS_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();
    let input = "unlock 1234\n\
        month 2024-03\n\
        add income 1000 Salário Pagamento 2024-03-05\n\
        add expense 300 Alimentação \"Feira da semana\" 2024-03-06\n\
        summary\n\
        exit\n";

    shell(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("PIN created"))
        .stdout(contains("R$ 700.00"))
        .stdout(contains("Alimentação"));

    assert!(home.path().join("data").join("transactions.json").exists());
    assert!(home.path().join("data").join("pin.json").exists());
}

#[test]
fn locked_shell_refuses_reports() {
    let home = tempdir().unwrap();
    shell(home.path())
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Session is locked"))
        .stdout(contains("R$").not());
}

#[test]
fn wrong_pin_on_second_run_is_rejected() {
    let home = tempdir().unwrap();
    shell(home.path())
        .write_stdin("unlock 1234\nexit\n")
        .assert()
        .success();

    shell(home.path())
        .write_stdin("unlock 9999\nlist\n")
        .assert()
        .success()
        .stdout(contains("Incorrect PIN"))
        .stdout(contains("Session is locked"));
}

#[test]
fn backup_and_restore_through_files() {
    let home = tempdir().unwrap();
    let backup = home.path().join("export.json");
    let input = format!(
        "unlock 1\nmonth 2024-03\ninvest reserva 5000\nadd expense 80 Transporte Uber 2024-03-02\nbackup {}\nexit\n",
        backup.display()
    );
    shell(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Backup written"));

    let document = std::fs::read_to_string(&backup).unwrap();
    assert!(document.contains("\"version\": \"1.0\""));

    let other = tempdir().unwrap();
    let input = format!("unlock 2\nrestore {}\ninvestments\nexit\n", backup.display());
    shell(other.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Restored 1 transaction(s)"))
        .stdout(contains("R$ 5000.00"));
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = tempdir().unwrap();
    shell(home.path())
        .write_stdin("sumary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `sumary`"))
        .stdout(contains("Suggestion: `summary`?"));
}
