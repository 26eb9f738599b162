//! Dependency initialization and wiring for search synchronization.

use std::sync::Arc;
use tracing::{info, warn};

use crate::client::{OpenSearchClientFactory, SharedClientFactory};
use crate::config::SyncSettings;
use crate::context::SyncContext;
use crate::errors::SyncError;
use search_sync_repository::{ClientConfig, OpenSearchClient, SearchEngineClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Settings the context was built from.
    pub settings: SyncSettings,
    /// The shared synchronization context.
    pub context: Arc<SyncContext>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Loads `.env` if present, reads [`SyncSettings`] and [`ClientConfig`],
    /// and verifies the search engine is reachable unless writes are
    /// disabled.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SyncError)` - If configuration is invalid or the engine is unhealthy
    pub async fn new() -> Result<Self, SyncError> {
        dotenv::dotenv().ok();

        let settings = SyncSettings::from_env()?;
        let client_config = ClientConfig::from_env();

        Self::with_config(settings, client_config).await
    }

    /// Initialize dependencies from explicit configuration.
    pub async fn with_config(
        settings: SyncSettings,
        client_config: ClientConfig,
    ) -> Result<Self, SyncError> {
        info!(
            opensearch_url = %client_config.url,
            environment = %settings.environment,
            default_index = %settings.default_index,
            disabled = settings.disabled,
            "Initializing dependencies"
        );

        if settings.disabled {
            warn!("Search synchronization is disabled, skipping health check");
        } else {
            let probe = OpenSearchClient::new(&client_config).map_err(|e| {
                SyncError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;

            let healthy = probe.health_check().await.map_err(|e| {
                SyncError::config(format!("OpenSearch health check failed: {}", e))
            })?;

            if !healthy {
                return Err(SyncError::config("OpenSearch cluster is unhealthy"));
            }

            info!("OpenSearch connection verified");
        }

        let factory = Arc::new(OpenSearchClientFactory::new(client_config));
        let context = Arc::new(SyncContext::from_settings(&settings, factory));

        Ok(Self { settings, context })
    }

    /// Build dependencies around an existing client, shared by every model.
    pub fn with_client(settings: SyncSettings, client: Arc<dyn SearchEngineClient>) -> Self {
        let factory = Arc::new(SharedClientFactory::new(client));
        let context = Arc::new(SyncContext::from_settings(&settings, factory));

        Self { settings, context }
    }
}
