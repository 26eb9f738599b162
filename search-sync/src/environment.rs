//! Runtime environment signal.
//!
//! The environment name decides whether index names get the test suffix and
//! whether the avoid-on-tests guard applies.

/// Environment variable holding the runtime environment name.
pub const ENVIRONMENT_VAR: &str = "SEARCH_SYNC_ENV";

/// Environment assumed when the variable is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Suffix appended to index names in the test environment.
pub const TEST_INDEX_SUFFIX: &str = "_test";

/// The current runtime environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    name: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT)
    }
}

impl Environment {
    /// Create an environment with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The test environment.
    pub fn test() -> Self {
        Self::new("test")
    }

    /// The environment name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the test environment (exact match, any case).
    pub fn is_test(&self) -> bool {
        self.name.eq_ignore_ascii_case("test")
    }

    /// Effective index name for a configured one.
    pub fn index_name(&self, configured: &str) -> String {
        if self.is_test() {
            format!("{}{}", configured, TEST_INDEX_SUFFIX)
        } else {
            configured.to_string()
        }
    }
}
