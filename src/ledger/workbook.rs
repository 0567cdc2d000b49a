use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use itertools::Itertools;
use rust_xlsxwriter::Workbook;

use crate::{
    ledger::{BillingRecord, DATE_FORMAT, HEADERS, Ledger},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Column titles of the spreadsheet history written by the form-based tool.
pub const LEGACY_HEADERS: [&str; 6] = [
    "Data",
    "Valor da leitura",
    "Dif(kWh)",
    "TE Total (R$)",
    "TUSD Total (R$)",
    "Valor total (R$)",
];

impl Ledger {
    /// Read the first sheet of an Excel workbook.
    ///
    /// Both the ledger column titles and [`LEGACY_HEADERS`] are accepted.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("failed to open the workbook `{}`", path.display()))?;
        let range = workbook
            .worksheet_range_at(0)
            .with_context(|| format!("`{}` has no sheets", path.display()))?
            .with_context(|| format!("failed to read the workbook `{}`", path.display()))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Self::default());
        };
        let header = header
            .iter()
            .map(|cell| match cell {
                Data::String(title) => title.as_str(),
                _ => "",
            })
            .collect_vec();
        ensure!(
            header == HEADERS || header == LEGACY_HEADERS,
            "unexpected workbook columns in `{}`: {header:?}",
            path.display(),
        );

        let records = rows
            .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .enumerate()
            .map(|(index, row)| {
                parse_row(row).with_context(|| format!("invalid workbook row #{}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(n_records = records.len(), "loaded");
        Ok(Self(records))
    }

    /// Write the ledger as a single-sheet Excel workbook, ledger column titles included.
    #[instrument(skip_all, fields(path = %path.display(), n_records = self.0.len()))]
    pub fn write_workbook(&self, path: &Path) -> Result {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (column, title) in (0_u16..).zip(HEADERS) {
            worksheet.write_string(0, column, title)?;
        }
        for (row, record) in (1_u32..).zip(&self.0) {
            worksheet.write_string(row, 0, record.date.format(DATE_FORMAT).to_string())?;
            worksheet.write_number(row, 1, record.reading.0)?;
            worksheet.write_number(row, 2, record.usage.0)?;
            worksheet.write_number(row, 3, record.energy_cost.0)?;
            worksheet.write_number(row, 4, record.distribution_cost.0)?;
            worksheet.write_number(row, 5, record.total_cost.0)?;
        }
        workbook
            .save(path)
            .with_context(|| format!("failed to write the workbook `{}`", path.display()))
    }
}

fn parse_row(row: &[Data]) -> Result<BillingRecord> {
    ensure!(row.len() >= HEADERS.len(), "expected {} cells, got {}", HEADERS.len(), row.len());
    let date = match &row[0] {
        Data::String(date) => NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)?,
        Data::DateTime(date_time) => date_time.as_datetime().context("invalid date")?.date(),
        other => bail!("unexpected date cell: {other:?}"),
    };
    Ok(BillingRecord::builder()
        .date(date)
        .reading(KilowattHours(parse_number(&row[1])?))
        .usage(KilowattHours(parse_number(&row[2])?))
        .energy_cost(Cost(parse_number(&row[3])?))
        .distribution_cost(Cost(parse_number(&row[4])?))
        .total_cost(Cost(parse_number(&row[5])?))
        .build())
}

fn parse_number(cell: &Data) -> Result<f64> {
    match cell {
        Data::Float(value) => Ok(*value),
        #[expect(clippy::cast_precision_loss)]
        Data::Int(value) => Ok(*value as f64),
        Data::String(value) => Ok(value.trim().parse()?),
        other => bail!("unexpected numeric cell: {other:?}"),
    }
}
