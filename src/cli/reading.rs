use clap::Parser;

use crate::{cli::StorageArgs, prelude::*, quantity::energy::KilowattHours};

#[derive(Parser)]
pub struct ReadingArgs {
    /// Overwrite the last reading instead of showing it.
    #[clap(long)]
    set: Option<KilowattHours>,
}

impl ReadingArgs {
    pub fn run(self, storage: &StorageArgs) -> Result {
        let store = storage.reading_store();
        match self.set {
            Some(reading) => {
                store.save(reading)?;
                info!(%reading, path = %store.path().display(), "saved");
            }
            None => {
                println!("{}", store.load()?);
            }
        }
        Ok(())
    }
}
