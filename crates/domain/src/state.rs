//! Core store state and intent traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for intents dispatched to a store.
///
/// An intent is a caller's request to change state. Every store has a fixed,
/// closed set of them.
pub trait Intent: Send + std::fmt::Debug {
    /// Returns the intent name, used for logging and metrics labels.
    fn kind(&self) -> &'static str;
}

/// Outcome of reducing an intent against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S> {
    /// The intent produced a new state.
    Changed(S),

    /// The intent left the state as it was.
    Unchanged,
}

impl<S> Transition<S> {
    /// Returns true if the intent produced a new state.
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed(_))
    }

    /// Returns the new state, or `current` if nothing changed.
    pub fn unwrap_or(self, current: S) -> S {
        match self {
            Transition::Changed(next) => next,
            Transition::Unchanged => current,
        }
    }
}

/// Trait for the state held by a [`Store`](crate::Store).
///
/// The state is an ordered sequence of items. Reducing must be pure and
/// deterministic:
/// - Given the same state and intent, it must always produce the same result
/// - It must not have side effects (no clock, no I/O)
/// - It must not fail; invalid intents are reported as `Transition::Unchanged`
pub trait StoreState: Default + Clone + PartialEq + Send + Sync + Sized + 'static {
    /// The intents this state accepts.
    type Action: Intent;

    /// The persisted unit of the state.
    type Item: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Returns the persistence key for this state.
    fn storage_key() -> &'static str;

    /// Computes the state that results from applying `action`.
    fn reduce(&self, action: Self::Action) -> Transition<Self>;

    /// Returns the items in order.
    fn items(&self) -> &[Self::Item];

    /// Builds the intent that replaces the state with hydrated items.
    fn load(items: Vec<Self::Item>) -> Self::Action;
}
