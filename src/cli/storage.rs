use std::path::PathBuf;

use clap::Parser;

use crate::reading::ReadingStore;

#[derive(Parser)]
pub struct StorageArgs {
    /// Text file holding the last meter reading.
    #[clap(
        long = "reading-path",
        env = "READING_PATH",
        default_value = "ultima_leitura.txt",
        global = true
    )]
    pub reading_path: PathBuf,

    /// CSV file holding the billing history.
    #[clap(
        long = "ledger-path",
        env = "LEDGER_PATH",
        default_value = "historico_consumo_sala_comercial.csv",
        global = true
    )]
    pub ledger_path: PathBuf,
}

impl StorageArgs {
    pub fn reading_store(&self) -> ReadingStore {
        ReadingStore::new(&self.reading_path)
    }
}
