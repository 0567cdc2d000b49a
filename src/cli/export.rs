use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::StorageArgs,
    ledger::{ExportFormat, Ledger},
    prelude::*,
};

#[derive(Parser)]
pub struct ExportArgs {
    /// Destination file, overwritten if it exists.
    #[clap(long, short)]
    output: PathBuf,

    #[clap(long, value_enum, default_value = "csv")]
    format: ExportFormat,
}

impl ExportArgs {
    pub fn run(self, storage: &StorageArgs) -> Result {
        let ledger = Ledger::load(&storage.ledger_path)?;
        ledger.export(&self.output, self.format)?;
        info!(n_records = ledger.len(), output = %self.output.display(), "exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_export_without_history() -> Result {
        let directory = TempDir::new()?;
        let storage = StorageArgs {
            reading_path: directory.path().join("reading.txt"),
            ledger_path: directory.path().join("ledger.csv"),
        };
        let output = directory.path().join("export.csv");
        ExportArgs { output: output.clone(), format: ExportFormat::Csv }.run(&storage)?;

        assert!(!storage.ledger_path.exists());
        assert_eq!(
            fs::read_to_string(&output)?,
            "Date,Reading Value,Usage Delta (kWh),Energy Cost,Distribution Cost,Total Cost\n",
        );
        Ok(())
    }
}
