use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::{prelude::*, quantity::energy::KilowattHours};

/// Last known meter reading, kept as a bare number in a text file.
pub struct ReadingStore {
    path: PathBuf,
}

impl ReadingStore {
    /// Reading assumed before anything has been saved.
    pub const DEFAULT_READING: KilowattHours = KilowattHours(10334.65);

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last saved reading, falling back to [`Self::DEFAULT_READING`] on the first run.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<KilowattHours> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(default = %Self::DEFAULT_READING, "no saved reading yet");
                return Ok(Self::DEFAULT_READING);
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read `{}`", self.path.display()));
            }
        };
        let reading = contents
            .trim()
            .parse::<KilowattHours>()
            .with_context(|| format!("`{}` does not contain a number", self.path.display()))?;
        debug!(%reading, "loaded");
        Ok(reading)
    }

    /// Replace the saved reading.
    #[instrument(skip_all, fields(path = %self.path.display(), reading = %reading))]
    pub fn save(&self, reading: KilowattHours) -> Result {
        fs::write(&self.path, reading.0.to_string())
            .with_context(|| format!("failed to write `{}`", self.path.display()))
    }
}
