use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StatusResult;

/// What to do when two files in a status share an id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// Keep every file; the last one with a given id owns the lookup slot.
    #[default]
    LastWins,
    /// Fail construction on the first duplicate id.
    Reject,
}

/// The selection newly classified files start with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialSelection {
    #[default]
    All,
    None,
}

impl InitialSelection {
    pub fn include(self) -> bool {
        self == InitialSelection::All
    }
}

/// Configuration for building working directory statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StatusConfig {
    pub duplicate_ids: DuplicateIdPolicy,
    pub initial_selection: InitialSelection,
}

impl StatusConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> StatusResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> StatusResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusError;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = StatusConfig::default();
        assert_eq!(c.duplicate_ids, DuplicateIdPolicy::LastWins);
        assert_eq!(c.initial_selection, InitialSelection::All);
        assert!(c.initial_selection.include());
    }

    #[test]
    fn parse_partial_toml() {
        let c = StatusConfig::from_toml_str("initial-selection = \"none\"\n").unwrap();
        assert_eq!(c.initial_selection, InitialSelection::None);
        assert_eq!(c.duplicate_ids, DuplicateIdPolicy::LastWins);
    }

    #[test]
    fn parse_empty_toml() {
        assert_eq!(StatusConfig::from_toml_str("").unwrap(), StatusConfig::default());
    }

    #[test]
    fn invalid_value_is_config_error() {
        let err = StatusConfig::from_toml_str("duplicate-ids = \"sometimes\"").unwrap_err();
        assert!(matches!(err, StatusError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duplicate-ids = \"reject\"").unwrap();
        let c = StatusConfig::load(file.path()).unwrap();
        assert_eq!(c.duplicate_ids, DuplicateIdPolicy::Reject);
        assert_eq!(c.initial_selection, InitialSelection::All);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StatusConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, StatusError::Io(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = StatusConfig {
            duplicate_ids: DuplicateIdPolicy::Reject,
            initial_selection: InitialSelection::None,
        };
        let s = toml::to_string(&c).unwrap();
        assert_eq!(StatusConfig::from_toml_str(&s).unwrap(), c);
    }
}
