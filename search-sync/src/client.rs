//! Lazily constructed search engine clients, one per model.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use search_sync_repository::{ClientConfig, OpenSearchClient, SearchEngineClient, SearchError};

/// Builds a search engine client for a model.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Create a client to be used by `model`.
    async fn connect(&self, model: &str) -> Result<Arc<dyn SearchEngineClient>, SearchError>;
}

/// Factory creating one OpenSearch client per call.
#[derive(Debug, Clone)]
pub struct OpenSearchClientFactory {
    config: ClientConfig,
}

impl OpenSearchClientFactory {
    /// Create a factory for the given connection configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientFactory for OpenSearchClientFactory {
    async fn connect(&self, model: &str) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        debug!(model = %model, url = %self.config.url, "Connecting search client");
        Ok(Arc::new(OpenSearchClient::new(&self.config)?))
    }
}

/// Factory handing out the same client to every model.
#[derive(Clone)]
pub struct SharedClientFactory {
    client: Arc<dyn SearchEngineClient>,
}

impl SharedClientFactory {
    /// Share `client` between all models.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClientFactory for SharedClientFactory {
    async fn connect(&self, _model: &str) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        Ok(self.client.clone())
    }
}

/// Cache of search engine clients keyed by model name.
///
/// A client is built on first use by a model and reused afterwards. A failed
/// construction is not cached, so the next call tries again.
pub struct ClientRegistry {
    factory: Arc<dyn ClientFactory>,
    clients: Mutex<HashMap<String, Arc<dyn SearchEngineClient>>>,
}

impl ClientRegistry {
    /// Create an empty registry backed by `factory`.
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// The client of `model`, building it if needed.
    pub async fn client(&self, model: &str) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(model) {
            return Ok(client.clone());
        }

        let client = self.factory.connect(model).await?;
        clients.insert(model.to_string(), client.clone());

        info!(model = %model, "Search client created");
        Ok(client)
    }

    /// Whether a client has been built for `model`.
    pub async fn is_connected(&self, model: &str) -> bool {
        self.clients.lock().await.contains_key(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_sync_shared::{CountRequest, DeleteRequest, IndexRequest, SearchRequest};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullClient;

    #[async_trait]
    impl SearchEngineClient for NullClient {
        async fn index(&self, _request: &IndexRequest) -> Result<Value, SearchError> {
            Ok(json!({}))
        }

        async fn delete(&self, _request: &DeleteRequest) -> Result<Value, SearchError> {
            Ok(json!({}))
        }

        async fn search(&self, _request: &SearchRequest) -> Result<Value, SearchError> {
            Ok(json!({}))
        }

        async fn count(&self, _request: &CountRequest) -> Result<Value, SearchError> {
            Ok(json!({}))
        }

        async fn refresh(&self, _index: &str, _doc_type: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    /// Counts connections and fails the first `failures` of them.
    struct CountingFactory {
        connects: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl ClientFactory for CountingFactory {
        async fn connect(&self, _model: &str) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
            let attempt = self.connects.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                return Err(SearchError::connection("unreachable"));
            }
            Ok(Arc::new(NullClient))
        }
    }

    #[tokio::test]
    async fn test_client_is_built_once_per_model() {
        let factory = Arc::new(CountingFactory {
            connects: AtomicUsize::new(0),
            failures: 0,
        });
        let registry = ClientRegistry::new(factory.clone());

        let first = registry.client("ElasticUser").await.unwrap();
        let second = registry.client("ElasticUser").await.unwrap();
        registry.client("Post").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.connects.load(Ordering::SeqCst), 2);
        assert!(registry.is_connected("ElasticUser").await);
        assert!(!registry.is_connected("Comment").await);
    }

    #[tokio::test]
    async fn test_failed_connect_is_retried() {
        let factory = Arc::new(CountingFactory {
            connects: AtomicUsize::new(0),
            failures: 1,
        });
        let registry = ClientRegistry::new(factory.clone());

        assert!(matches!(
            registry.client("ElasticUser").await,
            Err(SearchError::ConnectionError(_))
        ));
        assert!(!registry.is_connected("ElasticUser").await);

        assert!(registry.client("ElasticUser").await.is_ok());
        assert_eq!(factory.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_opensearch_factory_rejects_bad_url() {
        let factory = OpenSearchClientFactory::new(ClientConfig::new("::not a url::"));
        assert!(factory.connect("ElasticUser").await.is_err());
    }
}
