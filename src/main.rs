use atm_ledger::application::accounts::AccountService;
use atm_ledger::config::LedgerConfig;
use atm_ledger::domain::account::{AccountNumber, Balance, DebtLimit};
use atm_ledger::error::LedgerError;
use atm_ledger::infrastructure::open_store;
use atm_ledger::interfaces::csv::batch;
use atm_ledger::interfaces::csv::receipt_writer::ReceiptWriter;
use atm_ledger::telemetry;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde_json::json;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database. Balances are kept in memory when omitted.
    #[arg(long, env = "DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// How far below zero a balance may go.
    #[arg(long, env = "MAX_DEBT", default_value = "1000", global = true)]
    max_debt: Decimal,

    /// Seconds to wait for write access before giving up.
    #[arg(long, env = "LEDGER_WRITE_TIMEOUT_SECS", default_value_t = 5, global = true)]
    write_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the balance of an account
    Balance { account: String },
    /// Deposit a positive amount
    Deposit {
        account: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Withdraw a positive amount, possibly into the overdraft
    Withdraw {
        account: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Run the operations of a CSV file concurrently and print one receipt per row
    Batch { input: PathBuf },
    /// List every stored account
    Accounts,
}

const EXIT_REJECTED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    telemetry::init();
    let cli = Cli::parse();

    let config = LedgerConfig::new(
        DebtLimit::new(cli.max_debt)?,
        cli.db_path,
        Duration::from_secs(cli.write_timeout_secs),
    )?;
    let service = AccountService::new(open_store(&config).into_diagnostic()?);

    match cli.command {
        Command::Balance { account } => {
            let account = AccountNumber::new(account);
            let outcome = service.get_balance(&account).await;
            respond(outcome, |balance| {
                json!({ "account_number": account, "balance": balance.to_string() })
            })
        }
        Command::Deposit { account, amount } => {
            let account = AccountNumber::new(account);
            let outcome = service.deposit(&account, amount).await;
            respond(outcome, |balance| {
                json!({
                    "account_number": account,
                    "deposited_amount": amount.normalize().to_string(),
                    "balance": balance.to_string(),
                    "status": "success",
                })
            })
        }
        Command::Withdraw { account, amount } => {
            let account = AccountNumber::new(account);
            let outcome = service.withdraw(&account, amount).await;
            respond(outcome, |balance| {
                json!({
                    "account_number": account,
                    "withdrawn_amount": amount.normalize().to_string(),
                    "balance": balance.to_string(),
                    "status": "success",
                })
            })
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let stdout = io::stdout();
            batch::run_batch(&service, file, stdout.lock(), batch::MAX_IN_FLIGHT)
                .await
                .into_diagnostic()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Accounts => {
            let accounts = service.accounts().await?;
            let stdout = io::stdout();
            let mut writer = ReceiptWriter::new(stdout.lock());
            writer.write_accounts(&accounts).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints the success body, or maps the failure to a message and exit code.
fn respond(outcome: atm_ledger::error::Result<Balance>, body: impl FnOnce(Balance) -> serde_json::Value) -> Result<ExitCode> {
    match outcome {
        Ok(balance) => {
            println!("{}", body(balance));
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ (LedgerError::InsufficientFunds | LedgerError::InvalidAmount(_))) => {
            eprintln!("{:?}", miette::Report::new(err));
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        Err(err) => {
            tracing::error!(error = ?err, "request failed");
            eprintln!("internal error: unable to process request");
            Ok(ExitCode::FAILURE)
        }
    }
}
