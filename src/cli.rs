mod calculate;
mod export;
mod history;
mod import;
mod reading;
mod storage;

use clap::{Parser, Subcommand};

pub use self::storage::StorageArgs;
use crate::{
    cli::{
        calculate::CalculateArgs,
        export::ExportArgs,
        history::HistoryArgs,
        import::ImportArgs,
        reading::ReadingArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub storage: StorageArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        match self.command {
            Command::Calculate(args) => args.run(&self.storage),
            Command::History(args) => args.run(&self.storage),
            Command::Export(args) => args.run(&self.storage),
            Command::Import(args) => args.run(&self.storage),
            Command::Reading(args) => args.run(&self.storage),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the bill since the last reading, save the new reading, and append it to the history.
    #[clap(name = "calculate")]
    Calculate(Box<CalculateArgs>),

    /// Show the billing history.
    #[clap(name = "history")]
    History(HistoryArgs),

    /// Write the billing history to another file.
    #[clap(name = "export")]
    Export(ExportArgs),

    /// Read billing records from an Excel workbook into the history.
    #[clap(name = "import")]
    Import(ImportArgs),

    /// Show or overwrite the last meter reading.
    #[clap(name = "reading")]
    Reading(ReadingArgs),
}
