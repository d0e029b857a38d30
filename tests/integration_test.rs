use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn autos(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("autos").unwrap();
    cmd.current_dir(dir);
    cmd.env_remove("AUTOS_DB");
    cmd
}

fn init(dir: &Path) {
    autos(dir).arg("init").assert().success();
}

#[test]
fn test_init_creates_database() {
    let temp_dir = TempDir::new().unwrap();
    autos(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized database.db"));
    assert!(temp_dir.path().join("database.db").exists());

    // Running it again is harmless
    init(temp_dir.path());
}

#[test]
fn test_full_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);

    // Seed prints mark id and model id
    autos(dir)
        .arg("seed")
        .assert()
        .success()
        .stdout("1 1\n");

    autos(dir)
        .args(["add-mark", "LANCIA"])
        .assert()
        .success()
        .stdout("2\n");

    autos(dir)
        .args([
            "add-model",
            "1",
            "PANDA",
            "--status",
            "Produced",
            "--start",
            "2003-09-01",
            "--end",
            "2012-12-31",
        ])
        .assert()
        .success()
        .stdout("2\n");

    autos(dir)
        .args(["list", "autos"])
        .assert()
        .success()
        .stdout("(1, 'FIAT', '', '')\n(2, 'LANCIA', None, None)\n");

    autos(dir)
        .args(["find", "models", "marka_id=1", "nazwa=PANDA"])
        .assert()
        .success()
        .stdout("(2, 1, 'PANDA', None, 'Produced', '2003-09-01', '2012-12-31')\n");

    // Update the status of one model only
    autos(dir)
        .args(["update", "models", "1", "status=Ended"])
        .assert()
        .success()
        .stdout("OK\n");

    autos(dir)
        .args(["list", "models"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'TIPO', 'II', 'Ended'"))
        .stdout(predicate::str::contains("'PANDA', None, 'Produced'"));

    autos(dir)
        .args(["delete", "models", "id=1"])
        .assert()
        .success()
        .stdout("Deleted 1 row(s)\n");

    autos(dir)
        .args(["clear", "models"])
        .assert()
        .success()
        .stdout("Deleted 1 row(s)\n");

    autos(dir)
        .args(["list", "models"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_add_model_for_missing_mark_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);

    autos(dir)
        .args([
            "add-model",
            "9",
            "TIPO",
            "--status",
            "Ended",
            "--start",
            "2009-10-24 12:00:00",
            "--end",
            "2019-10-24 12:00:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FOREIGN KEY constraint failed"));
}

#[test]
fn test_unknown_names_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);

    autos(dir)
        .args(["list", "sqlite_master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown table: sqlite_master"));

    autos(dir)
        .args(["find", "autos", "1=1 OR nazwa=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column"));

    autos(dir)
        .args(["update", "autos", "1", "id=4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be changed"));
}

#[test]
fn test_update_missing_row() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);

    autos(dir)
        .args(["update", "models", "2", "status=Ended"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No row with id 2 in models"));
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);
    autos(dir).arg("seed").assert().success();

    let output = autos(dir)
        .args(["--json", "find", "models", "id=1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["nazwa"], "TIPO");
    assert_eq!(rows[0]["marka_id"], 1);
}

#[test]
fn test_db_option_and_env() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    autos(dir)
        .args(["--db", "other.db", "init"])
        .assert()
        .success();
    assert!(dir.join("other.db").exists());

    autos(dir)
        .env("AUTOS_DB", "from_env.db")
        .arg("init")
        .assert()
        .success();
    assert!(dir.join("from_env.db").exists());
}

#[test]
fn test_exec_reports_bad_statement() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    autos(dir)
        .args(["exec", "CREATE TABLE notes (body text)"])
        .assert()
        .success();

    autos(dir)
        .args(["exec", "CREAT TABLE broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Database error"));
}

#[test]
fn test_show_record() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);
    autos(dir).arg("seed").assert().success();

    autos(dir)
        .args(["show", "models", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[#1] TIPO"))
        .stdout(predicate::str::contains("Status:       HB"))
        .stdout(predicate::str::contains("Description:  II"));

    let output = autos(dir)
        .args(["--json", "show", "models", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let model: autos::Model = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(model.mark_id, 1);
    assert_eq!(model.status, "HB");
    assert_eq!(model.production_start, "2009-10-24 12:00:00");

    let output = autos(dir)
        .args(["--json", "show", "autos", "1"])
        .output()
        .unwrap();
    let mark: autos::Mark = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(mark.name, "FIAT");

    autos(dir)
        .args(["show", "autos", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No row with id 5 in autos"));
}

#[test]
fn test_update_rejects_values_insert_rejects() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);
    autos(dir).arg("seed").assert().success();

    autos(dir)
        .args(["update", "models", "1", "status=In production since"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));

    autos(dir)
        .args(["update", "models", "1", "start_prod=yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date 'yesterday'"));

    autos(dir)
        .args(["find", "models", "id=1"])
        .assert()
        .success()
        .stdout("(1, 1, 'TIPO', 'II', 'HB', '2009-10-24 12:00:00', '2019-10-24 12:00:00')\n");
}

#[test]
fn test_apostrophe_in_name() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    init(dir);

    autos(dir).args(["add-mark", "O'Brien"]).assert().success();

    autos(dir)
        .args(["list", "autos"])
        .assert()
        .success()
        .stdout("(1, \"O'Brien\", None, None)\n");
}
