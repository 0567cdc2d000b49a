use clap::Parser;

use crate::{
    cli::StorageArgs,
    ledger::Ledger,
    prelude::*,
    tables::{build_chart_table, build_ledger_table},
};

#[derive(Parser)]
pub struct HistoryArgs {
    /// Also chart the total cost over time.
    #[clap(long)]
    chart: bool,
}

impl HistoryArgs {
    pub fn run(self, storage: &StorageArgs) -> Result {
        let ledger = Ledger::load(&storage.ledger_path)?;
        if ledger.is_empty() {
            warn!(path = %storage.ledger_path.display(), "the history is empty");
            return Ok(());
        }
        info!(n_records = ledger.len(), total_cost = %ledger.total_cost(), "loaded");
        println!("{}", build_ledger_table(&ledger));
        if self.chart {
            println!("{}", build_chart_table(&ledger));
        }
        Ok(())
    }
}
