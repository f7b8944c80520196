use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

// Runtime configuration assembled from environment variables. The bot token
// itself is consumed by the client library through `TELOXIDE_TOKEN`.
#[derive(Clone, Debug)]
pub struct Config {
    // Static allowlist of admin user ids, used as a fallback when the live
    // chat administrator lookup is unavailable.
    pub admin_ids: HashSet<u64>,
    // Directory holding all persisted JSON documents.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let admin_ids = env::var("ADMIN_IDS")
            .map(|raw| parse_admin_ids(&raw))
            .unwrap_or_default();
        let data_dir = env::var("DATA_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);

        Config {
            admin_ids,
            data_dir,
        }
    }

    pub fn giveaway_path(&self) -> PathBuf {
        self.data_dir.join("giveaway.json")
    }

    pub fn admin_groups_path(&self) -> PathBuf {
        self.data_dir.join("admin_groups.json")
    }

    pub fn announce_settings_path(&self) -> PathBuf {
        self.data_dir.join("announce_settings.json")
    }

    pub fn custom_buttons_path(&self) -> PathBuf {
        self.data_dir.join("custom_buttons.json")
    }
}

// Entries that don't parse as numeric ids are dropped.
fn parse_admin_ids(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .filter_map(|chunk| chunk.trim().parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::config::parse_admin_ids;

    #[test]
    fn test_parse_admin_ids() {
        let ids = parse_admin_ids("1, 23,456");

        assert_eq!(ids.len(), 3);
        assert_eq!(ids.contains(&1), true);
        assert_eq!(ids.contains(&23), true);
        assert_eq!(ids.contains(&456), true);
    }

    #[test]
    fn test_parse_admin_ids_skips_invalid_chunks() {
        let ids = parse_admin_ids("1,oops,,-5, 7 ");

        assert_eq!(ids.len(), 2);
        assert_eq!(ids.contains(&1), true);
        assert_eq!(ids.contains(&7), true);
    }

    #[test]
    fn test_parse_admin_ids_from_empty_value() {
        let ids = parse_admin_ids("");

        assert_eq!(ids.is_empty(), true);
    }
}
