use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_db_path_without_rocksdb_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atm.db");

    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.args(["deposit", "1234", "150.5"])
        .arg("--db-path")
        .arg(&db_path);

    // Nothing is reported as deposited when it could not be persisted.
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("storage-rocksdb"));
    assert!(!db_path.exists());
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_db_path_with_rocksdb_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atm.db");

    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.args(["deposit", "1234", "150.5"])
        .arg("--db-path")
        .arg(&db_path);
    cmd.assert().success();

    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.args(["balance", "1234"]).arg("--db-path").arg(&db_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""balance":"150.5""#));
}
