mod workbook;

use std::{fs, io, path::Path};

use bon::Builder;
use chrono::NaiveDate;
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Calendar day format of the ledger and of the command line.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const HEADERS: [&str; 6] = [
    "Date",
    "Reading Value",
    "Usage Delta (kWh)",
    "Energy Cost",
    "Distribution Cost",
    "Total Cost",
];

/// Single committed calculation.
#[must_use]
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRecord {
    #[serde(rename = "Date", with = "day_month_year")]
    pub date: NaiveDate,

    /// Meter reading the bill was computed up to.
    #[serde(rename = "Reading Value")]
    pub reading: KilowattHours,

    #[serde(rename = "Usage Delta (kWh)")]
    pub usage: KilowattHours,

    #[serde(rename = "Energy Cost")]
    pub energy_cost: Cost,

    #[serde(rename = "Distribution Cost")]
    pub distribution_cost: Cost,

    #[serde(rename = "Total Cost")]
    pub total_cost: Cost,
}

/// Billing history in the insertion order.
///
/// There is no incremental append on disk: every change is a full
/// [`Ledger::load`], [`Ledger::append`], [`Ledger::persist`] cycle.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, derive_more::IntoIterator)]
pub struct Ledger(#[into_iterator(owned, ref)] Vec<BillingRecord>);

impl From<Vec<BillingRecord>> for Ledger {
    fn from(records: Vec<BillingRecord>) -> Self {
        Self(records)
    }
}

impl Ledger {
    /// Read the ledger, or start an empty one if the file does not exist yet.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = match ReaderBuilder::new().from_path(path) {
            Ok(reader) => reader,
            Err(error) if is_not_found(&error) => {
                debug!("no ledger yet, starting empty");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to open the ledger `{}`", path.display()));
            }
        };
        let headers = reader
            .headers()
            .with_context(|| format!("failed to read the ledger `{}`", path.display()))?;
        if headers.is_empty() {
            return Ok(Self::default());
        }
        ensure!(
            *headers == StringRecord::from(HEADERS.to_vec()),
            "unexpected ledger columns in `{}`: {headers:?}",
            path.display(),
        );
        let records = reader
            .deserialize()
            .collect::<Result<Vec<BillingRecord>, _>>()
            .with_context(|| format!("failed to read the ledger `{}`", path.display()))?;
        debug!(n_records = records.len(), "loaded");
        Ok(Self(records))
    }

    pub fn append(&mut self, record: BillingRecord) {
        self.0.push(record);
    }

    /// Overwrite the file with the full ledger, header row included.
    #[instrument(skip_all, fields(path = %path.display(), n_records = self.0.len()))]
    pub fn persist(&self, path: &Path) -> Result {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("failed to create the ledger `{}`", path.display()))?;
        writer.write_record(HEADERS)?;
        for record in &self.0 {
            writer.serialize(record)?;
        }
        writer.flush().with_context(|| format!("failed to write the ledger `{}`", path.display()))?;
        Ok(())
    }

    /// Write the ledger in the requested format.
    #[instrument(skip_all, fields(path = %path.display(), format = ?format))]
    pub fn export(&self, path: &Path, format: ExportFormat) -> Result {
        let document = Document { records: &self.0 };
        let contents = match format {
            ExportFormat::Csv => return self.persist(path),
            ExportFormat::Xlsx => return self.write_workbook(path),
            ExportFormat::Json => serde_json::to_string_pretty(&document)?,
            ExportFormat::Toml => toml::to_string(&document)?,
        };
        fs::write(path, contents)
            .with_context(|| format!("failed to export the ledger to `{}`", path.display()))
    }

    pub fn records(&self) -> &[BillingRecord] {
        &self.0
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_usage(&self) -> KilowattHours {
        self.0.iter().map(|record| record.usage).sum()
    }

    pub fn total_cost(&self) -> Cost {
        self.0.iter().map(|record| record.total_cost).sum()
    }
}

fn is_not_found(error: &csv::Error) -> bool {
    matches!(error.kind(), csv::ErrorKind::Io(error) if error.kind() == io::ErrorKind::NotFound)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    /// Same layout as the ledger itself.
    Csv,
    Json,
    Toml,

    /// Excel workbook with the ledger columns.
    Xlsx,
}

#[derive(Serialize)]
struct Document<'a> {
    records: &'a [BillingRecord],
}

mod day_month_year {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let date = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(Error::custom)
    }
}
