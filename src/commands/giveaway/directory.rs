use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::error::Result;
use crate::storage::JsonStore;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

// Maps an admin's user id to the single group chat they manage. The file
// keeps decimal-string keys for compatibility with earlier deployments.
// One admin maps to one group; relinking overwrites the previous group.
#[derive(Debug)]
pub struct AdminDirectory {
    store: JsonStore<HashMap<String, i64>>,
}

impl AdminDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AdminDirectory {
            store: JsonStore::new(path),
        }
    }

    pub fn link(&self, admin_id: u64, group_id: i64) -> Result<LinkOutcome> {
        let mut groups = self.groups();
        let key = admin_id.to_string();

        if groups.get(&key) == Some(&group_id) {
            return Ok(LinkOutcome::AlreadyLinked);
        }

        groups.insert(key, group_id);
        self.store.save(&groups)?;

        Ok(LinkOutcome::Linked)
    }

    pub fn group_for(&self, admin_id: u64) -> Option<i64> {
        self.groups().get(&admin_id.to_string()).copied()
    }

    pub fn contains(&self, admin_id: u64) -> bool {
        self.groups().contains_key(&admin_id.to_string())
    }

    // Distinct group ids across all admins, the announcement fan-out set.
    pub fn group_ids(&self) -> Vec<i64> {
        self.groups()
            .values()
            .copied()
            .collect::<HashSet<i64>>()
            .into_iter()
            .collect()
    }

    fn groups(&self) -> HashMap<String, i64> {
        self.store.load_or_default()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::commands::giveaway::directory::{AdminDirectory, LinkOutcome};

    fn get_directory(dir: &tempfile::TempDir) -> AdminDirectory {
        AdminDirectory::new(dir.path().join("admin_groups.json"))
    }

    #[test]
    fn test_link_a_new_admin() {
        let dir = tempdir().unwrap();
        let directory = get_directory(&dir);

        let outcome = directory.link(1, -100).unwrap();
        assert_eq!(outcome, LinkOutcome::Linked);
        assert_eq!(directory.group_for(1), Some(-100));
        assert_eq!(directory.contains(1), true);
    }

    #[test]
    fn test_link_the_same_group_twice() {
        let dir = tempdir().unwrap();
        let directory = get_directory(&dir);

        directory.link(1, -100).unwrap();
        let outcome = directory.link(1, -100).unwrap();
        assert_eq!(outcome, LinkOutcome::AlreadyLinked);
    }

    #[test]
    fn test_relinking_overwrites_the_previous_group() {
        let dir = tempdir().unwrap();
        let directory = get_directory(&dir);

        directory.link(1, -100).unwrap();
        let outcome = directory.link(1, -200).unwrap();

        assert_eq!(outcome, LinkOutcome::Linked);
        assert_eq!(directory.group_for(1), Some(-200));
    }

    #[test]
    fn test_group_ids_are_distinct() {
        let dir = tempdir().unwrap();
        let directory = get_directory(&dir);

        directory.link(1, -100).unwrap();
        directory.link(2, -100).unwrap();
        directory.link(3, -300).unwrap();

        let mut group_ids = directory.group_ids();
        group_ids.sort();
        assert_eq!(group_ids, vec![-300, -100]);
    }

    #[test]
    fn test_lookup_of_an_unknown_admin() {
        let dir = tempdir().unwrap();
        let directory = get_directory(&dir);

        assert_eq!(directory.group_for(404), None);
        assert_eq!(directory.contains(404), false);
    }
}
