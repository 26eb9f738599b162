//! Synchronization settings read from the environment.

use std::env;

use crate::environment::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR};
use crate::errors::SyncError;
use crate::registry::{DEFAULT_INDEX, DEFAULT_SIZE_LIMIT};

/// Settings shared by all synchronized models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Runtime environment name.
    pub environment: String,
    /// Index name given to models that do not set their own.
    pub default_index: String,
    /// Search size given to models that do not set their own.
    pub default_size_limit: usize,
    /// Skip every write and delete.
    pub disabled: bool,
    /// Skip writes and deletes in the test environment.
    pub avoid_on_tests: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            default_index: DEFAULT_INDEX.to_string(),
            default_size_limit: DEFAULT_SIZE_LIMIT,
            disabled: false,
            avoid_on_tests: false,
        }
    }
}

impl SyncSettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_SYNC_ENV`: runtime environment (default: development)
    /// - `SEARCH_SYNC_INDEX`: default index name (default: TORM)
    /// - `SEARCH_SYNC_SIZE`: default search size (default: 10)
    /// - `SEARCH_SYNC_DISABLED`: disable writes (default: false)
    /// - `SEARCH_SYNC_AVOID_ON_TESTS`: skip writes in test (default: false)
    ///
    /// # Returns
    ///
    /// * `Ok(SyncSettings)` - Loaded settings
    /// * `Err(SyncError)` - If a variable holds an unparsable value
    pub fn from_env() -> Result<Self, SyncError> {
        let defaults = Self::default();

        let environment = env::var(ENVIRONMENT_VAR).unwrap_or(defaults.environment);
        let default_index = env::var("SEARCH_SYNC_INDEX").unwrap_or(defaults.default_index);
        let default_size_limit = match env::var("SEARCH_SYNC_SIZE") {
            Ok(raw) => raw.parse::<usize>().map_err(|e| {
                SyncError::config(format!("SEARCH_SYNC_SIZE must be a number: {}", e))
            })?,
            Err(_) => defaults.default_size_limit,
        };
        let disabled = read_flag("SEARCH_SYNC_DISABLED")?;
        let avoid_on_tests = read_flag("SEARCH_SYNC_AVOID_ON_TESTS")?;

        Ok(Self {
            environment,
            default_index,
            default_size_limit,
            disabled,
            avoid_on_tests,
        })
    }
}

fn read_flag(name: &str) -> Result<bool, SyncError> {
    match env::var(name) {
        Ok(raw) => parse_flag(&raw)
            .ok_or_else(|| SyncError::config(format!("{} must be a boolean, got {:?}", name, raw))),
        Err(_) => Ok(false),
    }
}

/// Parse a boolean switch (`1/0`, `true/false`, `yes/no`, `on/off`).
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.default_index, "TORM");
        assert_eq!(settings.default_size_limit, 10);
        assert!(!settings.disabled);
        assert!(!settings.avoid_on_tests);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
