//! Reducer-driven store with hydration, subscribers and persistence.

use std::sync::Arc;

use storage::{KeyValueStore, Snapshot};

use crate::state::{Intent, StoreState, Transition};

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<S> = Box<dyn Fn(&Arc<S>) + Send + Sync>;

/// Single-owner container for one piece of client state.
///
/// The store is responsible for:
/// 1. Hydrating its state once, when it is opened
/// 2. Reducing dispatched intents into new immutable snapshots
/// 3. Notifying subscribers with each new snapshot
/// 4. Persisting each new snapshot, fire-and-forget
///
/// Dispatch is synchronous and runs to completion, so intents are applied in
/// the order they are dispatched. Intents that leave the state unchanged
/// neither notify nor persist.
pub struct Store<S, P>
where
    S: StoreState,
    P: KeyValueStore,
{
    state: Arc<S>,
    storage: P,
    subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
    next_subscription: u64,
}

impl<S, P> Store<S, P>
where
    S: StoreState,
    P: KeyValueStore,
{
    /// Opens a store, hydrating it from `storage`.
    ///
    /// Absent, unreadable or malformed snapshots yield an empty store; the
    /// failure is logged and counted but never returned.
    pub fn open(storage: P) -> Self {
        let state = hydrate::<S, P>(&storage);
        Self {
            state: Arc::new(state),
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns a shared handle to the current snapshot.
    ///
    /// The handle stays valid, and unchanged, after later dispatches.
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    /// Returns the persistence backend.
    pub fn storage(&self) -> &P {
        &self.storage
    }

    /// Applies an intent.
    ///
    /// Returns true if the state changed.
    pub fn dispatch(&mut self, action: S::Action) -> bool {
        let kind = action.kind();
        metrics::counter!("store_dispatch_total", "store" => S::storage_key(), "action" => kind)
            .increment(1);

        match self.state.reduce(action) {
            Transition::Unchanged => {
                tracing::trace!(store = S::storage_key(), action = kind, "intent left state unchanged");
                false
            }
            Transition::Changed(next) => {
                self.state = Arc::new(next);
                tracing::debug!(
                    store = S::storage_key(),
                    action = kind,
                    items = self.state.items().len(),
                    "state changed"
                );
                self.notify();
                self.persist();
                true
            }
        }
    }

    /// Registers a callback invoked with every new snapshot.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.state);
        }
    }

    fn persist(&self) {
        let result = Snapshot::new(self.state.items())
            .encode()
            .and_then(|raw| self.storage.save(S::storage_key(), &raw));

        if let Err(e) = result {
            tracing::warn!(store = S::storage_key(), error = %e, "failed to persist snapshot");
            metrics::counter!("store_persist_failures_total", "store" => S::storage_key())
                .increment(1);
        }
    }
}

fn hydrate<S, P>(storage: &P) -> S
where
    S: StoreState,
    P: KeyValueStore,
{
    let key = S::storage_key();
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(store = key, "no persisted snapshot, starting empty");
            return S::default();
        }
        Err(e) => {
            tracing::warn!(store = key, error = %e, "failed to read persisted snapshot");
            metrics::counter!("store_hydration_failures_total", "store" => key).increment(1);
            return S::default();
        }
    };

    match Snapshot::<Vec<S::Item>>::decode(&raw) {
        Ok(snapshot) => {
            let items = snapshot.into_items();
            let count = items.len();
            let state = S::default().reduce(S::load(items)).unwrap_or(S::default());
            tracing::info!(store = key, items = count, "hydrated from snapshot");
            state
        }
        Err(e) => {
            tracing::warn!(store = key, error = %e, "discarding malformed snapshot");
            metrics::counter!("store_hydration_failures_total", "store" => key).increment(1);
            S::default()
        }
    }
}
