use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::Result;

// Outcome of reading a persisted document. `Corrupt` is kept separate from
// `Absent` so callers can log damaged files instead of masking them.
#[derive(Debug)]
pub enum Loaded<T> {
    Value(T),
    Absent,
    Corrupt,
}

// Whole-file JSON persistence for a single document. Every mutation
// rewrites the file wholesale; `save` goes through a temporary file and a
// rename so a crash never leaves a partially written document behind.
#[derive(Debug)]
pub struct JsonStore<T> {
    path: PathBuf,
    _document: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            _document: PhantomData,
        }
    }

    pub fn load(&self) -> Loaded<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Loaded::Absent,
            Err(_) => return Loaded::Corrupt,
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Value(value),
            Err(_) => Loaded::Corrupt,
        }
    }

    pub fn load_or_default(&self) -> T
    where
        T: Default,
    {
        match self.load() {
            Loaded::Value(value) => value,
            Loaded::Absent => T::default(),
            Loaded::Corrupt => {
                warn!(
                    "The document at {} is corrupt, replacing it with the default",
                    self.path.display()
                );
                T::default()
            }
        }
    }

    pub fn save(&self, document: &T) -> Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let raw = serde_json::to_string_pretty(document)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::storage::{JsonStore, Loaded};

    #[test]
    fn test_load_from_a_missing_file() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Vec<String>> = JsonStore::new(dir.path().join("missing.json"));

        let loaded = store.load();
        assert_eq!(matches!(loaded, Loaded::Absent), true);
    }

    #[test]
    fn test_load_from_a_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let store: JsonStore<Vec<String>> = JsonStore::new(&path);

        let loaded = store.load();
        assert_eq!(matches!(loaded, Loaded::Corrupt), true);
    }

    #[test]
    fn test_load_or_default_replaces_a_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();
        let store: JsonStore<Vec<u64>> = JsonStore::new(&path);

        assert_eq!(store.load_or_default(), Vec::<u64>::new());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Vec<String>> = JsonStore::new(dir.path().join("doc.json"));
        let document = vec!["first".to_string(), "second".to_string()];

        store.save(&document).unwrap();
        let loaded = match store.load() {
            Loaded::Value(value) => value,
            _ => panic!("expected a stored value"),
        };

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_save_leaves_no_temporary_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let store: JsonStore<Vec<u64>> = JsonStore::new(&path);

        store.save(&vec![1, 2, 3]).unwrap();

        assert_eq!(path.exists(), true);
        assert_eq!(dir.path().join("doc.json.tmp").exists(), false);
    }

    #[test]
    fn test_save_overwrites_the_previous_document() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Vec<u64>> = JsonStore::new(dir.path().join("doc.json"));

        store.save(&vec![1]).unwrap();
        store.save(&vec![2, 3]).unwrap();

        assert_eq!(store.load_or_default(), vec![2, 3]);
    }
}
