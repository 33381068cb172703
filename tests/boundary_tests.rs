use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_debt_limit_boundary() {
    let output_path = std::path::PathBuf::from("boundary_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "account", "amount"]).unwrap();

    // Exactly at the limit is allowed, one ten-thousandth past it is not.
    wtr.write_record(["withdraw", "1", "1000"]).unwrap();
    wtr.write_record(["withdraw", "2", "1000.0001"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.env_remove("DB_PATH")
        .arg("batch")
        .arg(&output_path)
        .args(["--max-debt", "1000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,withdraw,1000,-1000,success"))
        .stdout(predicate::str::contains("2,withdraw,1000.0001,,insufficient_funds"));

    std::fs::remove_file(output_path).ok();
}

#[test]
fn test_extreme_decimal_precision() {
    let output_path = std::path::PathBuf::from("precision_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["type", "account", "amount"]).unwrap();

    wtr.write_record(["deposit", "1", "0.0001"]).unwrap();
    wtr.write_record(["deposit", "1", "0.0001"]).unwrap();
    wtr.write_record(["deposit", "1", "0.0001"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.env_remove("DB_PATH").arg("batch").arg(&output_path);

    // Deposits run concurrently, so only the last one to land sees the full sum.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,deposit,0.0001,0.0003,success"));

    std::fs::remove_file(output_path).ok();
}

#[test]
fn test_zero_debt_limit() {
    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.env_remove("DB_PATH")
        .args(["--max-debt", "0", "withdraw", "1", "0.01"]);

    cmd.assert().code(2);
}
