use std::path::PathBuf;

use crate::commands::giveaway::models::AnnounceSettings;
use crate::error::{Error, Result};
use crate::storage::JsonStore;

// Persisted interval and text of the periodic announcement. The announcer
// loop re-reads these on every cycle, so a change takes effect once the
// current sleep completes.
#[derive(Debug)]
pub struct AnnounceStore {
    store: JsonStore<AnnounceSettings>,
}

impl AnnounceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AnnounceStore {
            store: JsonStore::new(path),
        }
    }

    pub fn current(&self) -> AnnounceSettings {
        self.store.load_or_default()
    }

    // Changes the interval while keeping the configured message.
    pub fn set_interval(&self, minutes: u64) -> Result<AnnounceSettings> {
        Self::check_interval(minutes)?;

        let mut settings = self.current();
        settings.interval = minutes;
        self.store.save(&settings)?;

        Ok(settings)
    }

    pub fn set(&self, minutes: u64, message: &str) -> Result<AnnounceSettings> {
        Self::check_interval(minutes)?;

        let settings = AnnounceSettings {
            interval: minutes,
            message: message.trim().to_string(),
        };
        self.store.save(&settings)?;

        Ok(settings)
    }

    pub fn reset(&self) -> Result<AnnounceSettings> {
        let settings = AnnounceSettings::default();
        self.store.save(&settings)?;

        Ok(settings)
    }

    fn check_interval(minutes: u64) -> Result<()> {
        match minutes >= 1 {
            true => Ok(()),
            false => Err(Error::Giveaway(
                "Interval must be at least 1 minute.".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::commands::giveaway::announce::AnnounceStore;
    use crate::commands::giveaway::models::{DEFAULT_ANNOUNCE_INTERVAL, DEFAULT_ANNOUNCE_MESSAGE};
    use crate::error::Error;

    fn get_store(dir: &tempfile::TempDir) -> AnnounceStore {
        AnnounceStore::new(dir.path().join("announce_settings.json"))
    }

    #[test]
    fn test_defaults_for_a_missing_file() {
        let dir = tempdir().unwrap();
        let store = get_store(&dir);

        let settings = store.current();
        assert_eq!(settings.interval, DEFAULT_ANNOUNCE_INTERVAL);
        assert_eq!(settings.message, DEFAULT_ANNOUNCE_MESSAGE);
    }

    #[test]
    fn test_set_interval_keeps_the_message() {
        let dir = tempdir().unwrap();
        let store = get_store(&dir);
        store.set(10, "Custom message").unwrap();

        let settings = store.set_interval(45).unwrap();
        assert_eq!(settings.interval, 45);
        assert_eq!(settings.message, "Custom message");
    }

    #[test]
    fn test_get_error_for_a_zero_interval() {
        let dir = tempdir().unwrap();
        let store = get_store(&dir);
        store.set(10, "Custom message").unwrap();

        let result = store.set_interval(0);
        assert_eq!(result.is_err(), true);
        assert_eq!(
            result.unwrap_err(),
            Error::Giveaway("Interval must be at least 1 minute.".to_string())
        );

        // The stored settings stay untouched.
        assert_eq!(store.current().interval, 10);
    }

    #[test]
    fn test_set_trims_the_message() {
        let dir = tempdir().unwrap();
        let store = get_store(&dir);

        let settings = store.set(5, "  spaced out  ").unwrap();
        assert_eq!(settings.message, "spaced out");
    }

    #[test]
    fn test_reset_restores_the_defaults() {
        let dir = tempdir().unwrap();
        let store = get_store(&dir);
        store.set(99, "Changed").unwrap();

        let settings = store.reset().unwrap();
        assert_eq!(settings.interval, DEFAULT_ANNOUNCE_INTERVAL);
        assert_eq!(settings.message, DEFAULT_ANNOUNCE_MESSAGE);
        assert_eq!(store.current().interval, DEFAULT_ANNOUNCE_INTERVAL);
    }
}
