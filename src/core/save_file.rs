use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::codec;
use crate::shared::constants;
use crate::sync::Duration;
use crate::utils::{file_utils, logger};

/// The single-record file holding a saved elapsed time.
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.sw`, where the save file and logs live.
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("cannot determine home directory")?;
        Ok(home.join(constants::SAVE_DIR_NAME))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join(constants::SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the record with `elapsed`.
    pub fn store(&self, elapsed: Duration) -> Result<()> {
        let mut record = codec::encode(elapsed);
        record.push('\n');
        file_utils::write_file(&self.path, &record)
            .with_context(|| format!("failed to save time to {}", self.path.display()))?;
        logger::info(&format!("saved {} to {}", record.trim_end(), self.path.display()));
        Ok(())
    }

    pub fn load(&self) -> Result<Duration> {
        let text = file_utils::read_file_to_string(&self.path)?;
        let elapsed = codec::decode(&text)
            .with_context(|| format!("malformed save file {}", self.path.display()))?;
        Ok(elapsed)
    }

    /// Saved time, or zero if it cannot be read. Failures are reported, never returned.
    pub fn load_or_zero(&self) -> Duration {
        match self.load() {
            Ok(elapsed) => {
                logger::info(&format!(
                    "loaded {} from {}",
                    codec::encode(elapsed),
                    self.path.display()
                ));
                elapsed
            }
            Err(e) => {
                logger::error(&format!("no saved time, starting from zero: {:#}", e));
                eprintln!("{}: no saved time, starting from zero ({:#})", constants::APP_NAME, e);
                Duration::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn store_creates_directory_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("saved_time");
        let file = SaveFile::new(path.clone());

        file.store(Duration::from_millis(3_723_400)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1:02:03.40\n");

        file.store(Duration::from_secs(65)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "01:05.00\n");
        assert_eq!(file.load().unwrap(), Duration::from_secs(65));
    }

    #[test]
    fn missing_file_restores_zero() {
        let dir = tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("absent"));
        assert!(file.load().is_err());
        assert_eq!(file.load_or_zero(), Duration::ZERO);
    }

    #[test]
    fn malformed_file_restores_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved_time");
        fs::write(&path, "garbage").unwrap();
        let file = SaveFile::new(path);
        assert_eq!(file.load_or_zero(), Duration::ZERO);
    }

    #[test]
    fn store_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let file = SaveFile::new(blocker.join("saved_time"));
        assert!(file.store(Duration::ZERO).is_err());
    }
}
