//! Model lifecycle events and their observers.
//!
//! The ORM fires [`LifecycleEvent`]s through a model's [`LifecycleHooks`]
//! once the corresponding operation has completed. Observers compose: any
//! number may be registered for the same event and each runs in
//! registration order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::SyncError;
use crate::model::ModelStore;
use crate::sync::SearchSync;

/// Lifecycle points a model exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// A record was inserted or updated.
    AfterSave,
    /// A record was deleted.
    AfterDestroy,
}

/// Reacts to a lifecycle event of a record.
#[async_trait]
pub trait LifecycleObserver<M>: Send + Sync {
    /// Handle `event` for `record`.
    async fn notify(&self, event: LifecycleEvent, record: &M) -> Result<(), SyncError>;
}

/// Result of firing an event.
#[derive(Debug, Default)]
pub struct HookReport {
    /// Observers that ran.
    pub notified: usize,
    /// Errors returned by observers, in registration order.
    pub failures: Vec<SyncError>,
}

impl HookReport {
    /// Whether every observer succeeded.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Observer list of a model.
pub struct LifecycleHooks<M> {
    observers: Vec<(LifecycleEvent, Arc<dyn LifecycleObserver<M>>)>,
}

impl<M> Default for LifecycleHooks<M> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<M: Send + Sync> LifecycleHooks<M> {
    /// Create an empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer` for `event`.
    pub fn register(&mut self, event: LifecycleEvent, observer: Arc<dyn LifecycleObserver<M>>) {
        self.observers.push((event, observer));
    }

    /// Number of observers registered for `event`.
    pub fn observer_count(&self, event: LifecycleEvent) -> usize {
        self.observers.iter().filter(|(e, _)| *e == event).count()
    }

    /// Run every observer of `event` for `record`.
    ///
    /// A failing observer does not stop the others.
    pub async fn fire(&self, event: LifecycleEvent, record: &M) -> HookReport {
        let mut report = HookReport::default();

        for (_, observer) in self.observers.iter().filter(|(e, _)| *e == event) {
            report.notified += 1;
            if let Err(e) = observer.notify(event, record).await {
                warn!(event = ?event, error = %e, "Lifecycle observer failed");
                report.failures.push(e);
            }
        }

        report
    }
}

/// Writes the record's document after a save.
struct IndexOnSave<S: ModelStore> {
    sync: Arc<SearchSync<S>>,
}

#[async_trait]
impl<S: ModelStore + 'static> LifecycleObserver<S::Record> for IndexOnSave<S> {
    async fn notify(&self, _event: LifecycleEvent, record: &S::Record) -> Result<(), SyncError> {
        self.sync.update(record).await?;
        Ok(())
    }
}

/// Deletes the record's document after a destroy.
struct DeleteOnDestroy<S: ModelStore> {
    sync: Arc<SearchSync<S>>,
}

#[async_trait]
impl<S: ModelStore + 'static> LifecycleObserver<S::Record> for DeleteOnDestroy<S> {
    async fn notify(&self, _event: LifecycleEvent, record: &S::Record) -> Result<(), SyncError> {
        self.sync.delete(record).await?;
        Ok(())
    }
}

impl<S: ModelStore + 'static> SearchSync<S> {
    /// Register the write path to run after every save of the model.
    ///
    /// Deleting a record does not remove its document; see
    /// [`sync_deletes`](Self::sync_deletes).
    pub fn after_initialize(self: &Arc<Self>, hooks: &mut LifecycleHooks<S::Record>) {
        hooks.register(
            LifecycleEvent::AfterSave,
            Arc::new(IndexOnSave { sync: self.clone() }),
        );
    }

    /// Register the delete path to run after every destroy of the model.
    pub fn sync_deletes(self: &Arc<Self>, hooks: &mut LifecycleHooks<S::Record>) {
        hooks.register(
            LifecycleEvent::AfterDestroy,
            Arc::new(DeleteOnDestroy { sync: self.clone() }),
        );
    }
}
