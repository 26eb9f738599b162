//! Application-owned state shared by every synchronized model.

use std::sync::Arc;

use crate::client::{ClientFactory, ClientRegistry};
use crate::config::SyncSettings;
use crate::environment::Environment;
use crate::flags::GlobalFlags;
use crate::registry::{ConfigRegistry, SearchConfig};

/// Configuration registry, global flags, environment and client cache.
///
/// One context is created by the application and handed to every
/// [`SearchSync`](crate::SearchSync) it builds.
pub struct SyncContext {
    registry: ConfigRegistry,
    flags: GlobalFlags,
    environment: Environment,
    clients: ClientRegistry,
}

impl SyncContext {
    /// Create a context with default configuration.
    pub fn new(environment: Environment, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            registry: ConfigRegistry::new(),
            flags: GlobalFlags::new(),
            environment,
            clients: ClientRegistry::new(factory),
        }
    }

    /// Create a context from loaded settings.
    pub fn from_settings(settings: &SyncSettings, factory: Arc<dyn ClientFactory>) -> Self {
        let defaults = SearchConfig {
            index: settings.default_index.clone(),
            size_limit: settings.default_size_limit,
            ..Default::default()
        };

        let flags = GlobalFlags::new();
        flags.set_disabled(settings.disabled);
        flags.avoid_on_tests(settings.avoid_on_tests);

        Self {
            registry: ConfigRegistry::with_defaults(defaults),
            flags,
            environment: Environment::new(settings.environment.clone()),
            clients: ClientRegistry::new(factory),
        }
    }

    /// Per-model configuration.
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Global write switches.
    pub fn flags(&self) -> &GlobalFlags {
        &self.flags
    }

    /// Current runtime environment.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Per-model client cache.
    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }
}
