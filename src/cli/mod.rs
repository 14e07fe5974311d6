pub mod output;
mod system_clock;

use std::{env, path::PathBuf};

use billing_config::{BillingConfig, ConfigManager};
use billing_core::{Clock, FixedClock};
use billing_domain::ApartmentId;

use crate::{errors::AppError, runner};

pub use system_clock::SystemClock;

const USAGE: &str = "usage: housing_billing [statement <apartment> <year> | export <csv-path>]";

/// Commands accepted by the binary. No arguments runs the monthly billing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bill,
    Statement { apartment: ApartmentId, year: i32 },
    Export { destination: PathBuf },
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            [] => Ok(Command::Bill),
            ["help" | "--help" | "-h"] => Ok(Command::Help),
            ["statement", apartment, year] => {
                let apartment = apartment
                    .parse::<u32>()
                    .map_err(|_| usage_error(format!("`{apartment}` is not an apartment number")))?;
                let year = year
                    .parse::<i32>()
                    .map_err(|_| usage_error(format!("`{year}` is not a year")))?;
                Ok(Command::Statement {
                    apartment: ApartmentId(apartment),
                    year,
                })
            }
            ["export", destination] => Ok(Command::Export {
                destination: PathBuf::from(*destination),
            }),
            _ => Err(usage_error(format!(
                "unrecognised arguments `{}`",
                args.join(" ")
            ))),
        }
    }
}

fn usage_error(reason: String) -> AppError {
    AppError::Usage(format!("{reason}\n{USAGE}"))
}

fn clock_for(config: &BillingConfig) -> Box<dyn Clock> {
    match config.today {
        Some(today) => Box::new(FixedClock::on(today)),
        None => Box::new(SystemClock),
    }
}

/// Entry point used by the binary.
pub fn run_cli() -> Result<(), AppError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

pub fn run_with_args(args: &[String]) -> Result<(), AppError> {
    let command = Command::parse(args)?;
    if command == Command::Help {
        output::info(USAGE);
        return Ok(());
    }

    let config = ConfigManager::from_env()?.load_with_env()?;
    match command {
        Command::Bill => {
            let clock = clock_for(&config);
            let report = runner::run(&config, clock.as_ref())?;
            output::run_report(&report);
        }
        Command::Statement { apartment, year } => {
            let statement = runner::statement(&config, apartment, year)?;
            output::yearly_statement(&statement);
        }
        Command::Export { destination } => {
            let rows = runner::export(&config, &destination)?;
            output::success(format!(
                "Exported {rows} ledger entries to {}",
                destination.display()
            ));
        }
        Command::Help => {}
    }
    Ok(())
}
