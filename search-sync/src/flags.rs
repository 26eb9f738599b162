//! Process-wide write toggles.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::environment::Environment;

/// Global switches consulted before every write or delete.
#[derive(Debug, Default)]
pub struct GlobalFlags {
    disabled: AtomicBool,
    avoid_on_tests: AtomicBool,
}

impl GlobalFlags {
    /// Create flags with both switches off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn all writes off (or back on).
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Whether writes are disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Skip writes while running in the test environment.
    pub fn avoid_on_tests(&self, avoid: bool) {
        self.avoid_on_tests.store(avoid, Ordering::SeqCst);
    }

    /// Whether writes are skipped in the test environment.
    pub fn is_avoiding_on_tests(&self) -> bool {
        self.avoid_on_tests.load(Ordering::SeqCst)
    }

    /// Whether a write should be skipped in `environment`.
    pub fn skips_writes(&self, environment: &Environment) -> bool {
        self.is_disabled() || (self.is_avoiding_on_tests() && environment.is_test())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_allow_writes() {
        let flags = GlobalFlags::new();
        assert!(!flags.skips_writes(&Environment::test()));
        assert!(!flags.skips_writes(&Environment::default()));
    }

    #[test]
    fn test_disabled_skips_everywhere() {
        let flags = GlobalFlags::new();
        flags.set_disabled(true);
        assert!(flags.skips_writes(&Environment::default()));
        assert!(flags.skips_writes(&Environment::test()));

        flags.set_disabled(false);
        assert!(!flags.skips_writes(&Environment::default()));
    }

    #[test]
    fn test_avoid_on_tests_only_in_test_environment() {
        let flags = GlobalFlags::new();
        flags.avoid_on_tests(true);
        assert!(flags.is_avoiding_on_tests());
        assert!(flags.skips_writes(&Environment::test()));
        assert!(!flags.skips_writes(&Environment::new("production")));
    }
}
