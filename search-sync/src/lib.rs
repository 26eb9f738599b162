//! # Search Sync
//!
//! Keeps ORM model records in step with documents in a search engine.
//!
//! A [`SearchSync`] is attached to a model through its [`ModelStore`]. It
//! derives the model's index and document type, projects records into
//! documents, and issues index, delete, search and count requests through a
//! per-model [`SearchEngineClient`](search_sync_repository::SearchEngineClient).
//! Registering it on the model's [`LifecycleHooks`] writes the document
//! after every save.
//!
//! Shared state (per-model configuration, global flags, environment and the
//! client cache) lives in a [`SyncContext`] owned by the application.

pub mod client;
pub mod config;
pub mod context;
pub mod environment;
pub mod errors;
pub mod flags;
pub mod hooks;
pub mod model;
pub mod naming;
pub mod projection;
pub mod registry;
pub mod store;
pub mod sync;
pub mod telemetry;

pub use client::{ClientFactory, ClientRegistry, OpenSearchClientFactory, SharedClientFactory};
pub use config::{Dependencies, SyncSettings};
pub use context::SyncContext;
pub use environment::Environment;
pub use errors::SyncError;
pub use flags::GlobalFlags;
pub use hooks::{HookReport, LifecycleEvent, LifecycleHooks, LifecycleObserver};
pub use model::{Model, ModelStore};
pub use registry::{ConfigRegistry, OperationStatus, SearchConfig};
pub use store::{JsonRecord, JsonRecordStore};
pub use sync::{ImportSummary, SearchOptions, SearchSync};
