use std::path::PathBuf;

use clap::Parser;

use crate::{cli::StorageArgs, ledger::Ledger, prelude::*};

#[derive(Parser)]
pub struct ImportArgs {
    /// Excel workbook to read the records from.
    #[clap(long, short)]
    input: PathBuf,

    /// Discard the current history instead of appending to it.
    #[clap(long)]
    replace: bool,
}

impl ImportArgs {
    pub fn run(self, storage: &StorageArgs) -> Result {
        let imported = Ledger::read_workbook(&self.input)?;
        let n_imported = imported.len();
        let ledger = if self.replace {
            imported
        } else {
            let mut ledger = Ledger::load(&storage.ledger_path)?;
            for record in imported {
                ledger.append(record);
            }
            ledger
        };
        ledger.persist(&storage.ledger_path)?;
        info!(n_imported, n_records = ledger.len(), input = %self.input.display(), "imported");
        Ok(())
    }
}
