use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Target;

/// Configuration for building and mutating the nested structure.
///
/// This struct controls how the initial structure is generated and which
/// group insertions and removals act on when no explicit target is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Seed for the record generator.
    ///
    /// When absent, every run generates a different structure.
    pub seed: Option<u64>,

    /// The number of records the initial structure is built with.
    records: usize,

    /// The group insertions and removals act on by default.
    target: Target,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            records: default_records(),
            target: Target::FIRST,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of records in the initial structure.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.records
    }

    /// Sets the number of records in the initial structure.
    pub const fn set_records(&mut self, records: usize) {
        self.records = records;
    }

    /// Returns the default target group.
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    /// Overrides the category and/or group of the default target.
    pub fn retarget(&mut self, category: Option<usize>, group: Option<usize>) {
        if let Some(category) = category {
            self.target.category = category;
        }
        if let Some(group) = group {
            self.target.group = group;
        }
    }
}

const fn default_records() -> usize {
    30
}

/// The serialized versions of the configuration.
/// This allows the file format to evolve without breaking older files.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,

        /// The number of records in the initial structure.
        #[serde(default = "default_records")]
        records: usize,

        /// Zero-based position of the default category.
        #[serde(default)]
        category: usize,

        /// Zero-based position of the default group within the category.
        #[serde(default)]
        group: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                seed,
                records,
                category,
                group,
            } => Self {
                seed,
                records,
                target: Target::new(category, group),
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            seed: config.seed,
            records: config.records,
            category: config.target.category,
            group: config.target.group,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nseed = 42\nrecords = 12\ncategory = 1\ngroup = 2\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.records(), 12);
        assert_eq!(config.target(), Target::new(1, 2));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nrecords = \"thirty\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nestrec.toml");

        let mut config = Config {
            seed: Some(7),
            ..Config::default()
        };
        config.set_records(5);
        config.retarget(None, Some(3));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
