use rand::Rng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` deposits of random cent amounts against `account` and returns
/// their sum.
pub fn generate_deposits(path: &Path, account: &str, rows: usize) -> Result<Decimal, Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["type", "account", "amount"])?;

    let mut rng = rand::thread_rng();
    let mut total = Decimal::ZERO;
    for _ in 0..rows {
        let amount = Decimal::new(rng.gen_range(1..=100_000), 2);
        total += amount;
        wtr.write_record(["deposit", account, &amount.to_string()])?;
    }

    wtr.flush()?;
    Ok(total)
}

/// Writes `rows` identical withdrawals of `amount` against `account`.
pub fn generate_withdrawals(path: &Path, account: &str, amount: &str, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["type", "account", "amount"])?;

    for _ in 0..rows {
        wtr.write_record(["withdraw", account, amount])?;
    }

    wtr.flush()?;
    Ok(())
}
