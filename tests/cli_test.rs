use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn ledger() -> Command {
    let mut cmd = Command::new(cargo_bin!("atm-ledger"));
    cmd.env_remove("DB_PATH").env_remove("MAX_DEBT");
    cmd
}

#[test]
fn test_deposit_reports_new_balance() {
    ledger()
        .args(["deposit", "1234", "150.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""account_number":"1234""#))
        .stdout(predicate::str::contains(r#""balance":"150.5""#))
        .stdout(predicate::str::contains(r#""status":"success""#));
}

#[test]
fn test_withdraw_into_overdraft() {
    ledger()
        .args(["withdraw", "223", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""withdrawn_amount":"20""#))
        .stdout(predicate::str::contains(r#""balance":"-20""#));
}

#[test]
fn test_overdraft_error() {
    ledger()
        .args(["withdraw", "334", "1500"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("insufficient funds"));
}

#[test]
fn test_non_positive_amount_rejected() {
    ledger()
        .args(["deposit", "9", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid amount"));
}

#[test]
fn test_new_account_get_balance() {
    ledger()
        .args(["balance", "445"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""balance":"0""#));
}

#[test]
fn test_max_debt_from_environment() {
    ledger()
        .env("MAX_DEBT", "50")
        .args(["withdraw", "1", "60"])
        .assert()
        .code(2);

    ledger()
        .env("MAX_DEBT", "50")
        .args(["withdraw", "1", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""balance":"-50""#));
}

#[test]
fn test_batch_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "type, account, amount")?;
    writeln!(file, "deposit, 112, 50.0")?;
    writeln!(file, "withdraw, 334, 1500")?;
    writeln!(file, "balance, 445, ")?;
    writeln!(file, "deposit, 9, 0")?;
    writeln!(file, "withdraw, 223, 20")?;

    ledger()
        .arg("batch")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("account,type,amount,balance,status"))
        .stdout(predicate::str::contains("112,deposit,50,50,success"))
        .stdout(predicate::str::contains("334,withdraw,1500,,insufficient_funds"))
        .stdout(predicate::str::contains("445,balance,,0,success"))
        .stdout(predicate::str::contains("9,deposit,0,,invalid_amount"))
        .stdout(predicate::str::contains("223,withdraw,20,-20,success"));

    Ok(())
}

#[test]
fn test_accounts_on_empty_store_prints_header() {
    ledger()
        .arg("accounts")
        .assert()
        .success()
        .stdout("account,balance\n");
}
