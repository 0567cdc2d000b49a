use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    billing::{Bill, Tariff},
    cli::StorageArgs,
    ledger::{BillingRecord, DATE_FORMAT, Ledger},
    prelude::*,
    quantity::{energy::KilowattHours, proportion::Proportion, rate::KilowattHourRate},
    reading::ReadingStore,
    tables::build_bill_table,
};

#[derive(Parser)]
pub struct CalculateArgs {
    /// Previous meter reading, defaults to the last saved one.
    #[clap(long)]
    previous: Option<KilowattHours>,

    /// Current meter reading, defaults to the previous one.
    #[clap(long)]
    current: Option<KilowattHours>,

    #[clap(flatten)]
    tariff: TariffArgs,

    /// Part of the total cost billed to the room.
    #[clap(long = "share-fraction", env = "SHARE_FRACTION", default_value = "0.8141")]
    share: Proportion,

    /// Billing date as `dd/mm/yyyy`, defaults to today.
    #[clap(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Only print the bill, do not save anything.
    #[clap(long)]
    dry_run: bool,
}

#[derive(Copy, Clone, Parser)]
pub struct TariffArgs {
    /// TE, energy tariff per kilowatt-hour.
    #[clap(long = "energy-rate", env = "ENERGY_RATE", default_value = "0.37361703")]
    energy_rate: KilowattHourRate,

    /// TUSD, distribution tariff per kilowatt-hour.
    #[clap(long = "distribution-rate", env = "DISTRIBUTION_RATE", default_value = "0.55196809")]
    distribution_rate: KilowattHourRate,
}

impl From<TariffArgs> for Tariff {
    fn from(args: TariffArgs) -> Self {
        Self { energy_rate: args.energy_rate, distribution_rate: args.distribution_rate }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

impl CalculateArgs {
    pub fn run(self, storage: &StorageArgs) -> Result {
        let reading_store = storage.reading_store();
        let previous = match self.previous {
            Some(previous) => previous,
            None => reading_store.load()?,
        };
        let current = self.current.unwrap_or(previous);
        let tariff = Tariff::from(self.tariff);

        let bill = Bill::compute(previous, current, tariff, self.share);
        info!(%previous, %current, usage = %bill.usage, total_cost = %bill.total_cost, "calculated");
        println!("{}", build_bill_table(&bill, tariff, self.share));

        if self.dry_run {
            warn!("dry run, nothing is saved");
            return Ok(());
        }
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let ledger = commit(&reading_store, &storage.ledger_path, bill.into_record(date, current))?;
        info!(n_records = ledger.len(), "saved");
        Ok(())
    }
}

/// Save the record's reading as the last one, and append the record to the ledger.
///
/// The ledger is read and rewritten in full.
#[instrument(skip_all, fields(date = %record.date, reading = %record.reading))]
fn commit(
    reading_store: &ReadingStore,
    ledger_path: &Path,
    record: BillingRecord,
) -> Result<Ledger> {
    reading_store.save(record.reading)?;
    let mut ledger = Ledger::load(ledger_path)?;
    ledger.append(record);
    ledger.persist(ledger_path)?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::quantity::cost::Cost;

    fn storage(directory: &TempDir) -> StorageArgs {
        StorageArgs {
            reading_path: directory.path().join("reading.txt"),
            ledger_path: directory.path().join("ledger.csv"),
        }
    }

    fn calculate(current: f64, date: &str) -> CalculateArgs {
        CalculateArgs {
            previous: None,
            current: Some(KilowattHours(current)),
            tariff: TariffArgs {
                energy_rate: KilowattHourRate(0.373_617_03),
                distribution_rate: KilowattHourRate(0.551_968_09),
            },
            share: Proportion(0.8141),
            date: Some(parse_date(date).unwrap()),
            dry_run: false,
        }
    }

    #[test]
    fn test_first_calculation() -> Result {
        let directory = TempDir::new()?;
        let storage = storage(&directory);
        calculate(10400.0, "01/08/2024").run(&storage)?;

        assert_eq!(storage.reading_store().load()?, KilowattHours(10400.0));
        let ledger = Ledger::load(&storage.ledger_path)?;
        assert_eq!(ledger.len(), 1);
        let record = &ledger.records()[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        assert_eq!(record.reading, KilowattHours(10400.0));
        assert_eq!(record.usage, KilowattHours(10400.0) - ReadingStore::DEFAULT_READING);
        Ok(())
    }

    #[test]
    fn test_calculation_continues_from_saved_reading() -> Result {
        let directory = TempDir::new()?;
        let storage = storage(&directory);
        calculate(10400.0, "01/08/2024").run(&storage)?;
        calculate(10500.0, "01/09/2024").run(&storage)?;

        let ledger = Ledger::load(&storage.ledger_path)?;
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[1].usage, KilowattHours(100.0));
        assert_eq!(ledger.records()[1].reading, KilowattHours(10500.0));
        assert_eq!(storage.reading_store().load()?, KilowattHours(10500.0));
        Ok(())
    }

    #[test]
    fn test_unchanged_reading_by_default() -> Result {
        let directory = TempDir::new()?;
        let storage = storage(&directory);
        CalculateArgs { current: None, ..calculate(0.0, "01/08/2024") }.run(&storage)?;

        let ledger = Ledger::load(&storage.ledger_path)?;
        assert_eq!(ledger.records()[0].usage, KilowattHours::ZERO);
        assert_eq!(ledger.records()[0].total_cost, Cost::ZERO);
        assert_eq!(storage.reading_store().load()?, ReadingStore::DEFAULT_READING);
        Ok(())
    }

    #[test]
    fn test_dry_run_saves_nothing() -> Result {
        let directory = TempDir::new()?;
        let storage = storage(&directory);
        CalculateArgs { dry_run: true, ..calculate(10400.0, "01/08/2024") }.run(&storage)?;

        assert!(!storage.reading_path.exists());
        assert!(!storage.ledger_path.exists());
        Ok(())
    }

    #[test]
    fn test_explicit_previous_reading() -> Result {
        let directory = TempDir::new()?;
        let storage = storage(&directory);
        CalculateArgs { previous: Some(KilowattHours(10300.0)), ..calculate(10400.0, "01/08/2024") }
            .run(&storage)?;

        let ledger = Ledger::load(&storage.ledger_path)?;
        assert_eq!(ledger.records()[0].usage, KilowattHours(100.0));
        Ok(())
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("30/09/2024").ok(), NaiveDate::from_ymd_opt(2024, 9, 30));
        assert!(parse_date("2024-09-30").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = crate::cli::Args::try_parse_from([
            "room-billing",
            "--ledger-path",
            "history.csv",
            "calculate",
            "--current",
            "10400",
            "--energy-rate",
            "0.4",
            "--date",
            "01/08/2024",
        ])
        .unwrap();
        assert_eq!(args.storage.ledger_path, Path::new("history.csv"));
        let crate::cli::Command::Calculate(args) = args.command else {
            panic!("expected `calculate`");
        };
        assert_eq!(args.current, Some(KilowattHours(10400.0)));
        assert_eq!(args.tariff.energy_rate, KilowattHourRate(0.4));
        assert_eq!(args.share, Proportion(0.8141));
        assert!(!args.dry_run);
    }
}
