//! Consumer-held reference state
//!
//! A [`ReferenceView`] is owned by whatever displays the data. Loads write
//! into it through a [`ViewHandle`], which only holds a weak reference:
//! once the view is dropped, in-flight loads finish without touching it.

use crate::loader::Loaded;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::{Arc, Weak};

/// Snapshot of a view's state
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    /// A load is in flight
    pub loading: bool,
    /// Message from the last failed load
    pub error: Option<String>,
    /// Items currently displayed
    pub items: Arc<Vec<T>>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            items: Arc::new(Vec::new()),
        }
    }
}

/// Reference list state owned by a consumer
#[derive(Debug)]
pub struct ReferenceView<T> {
    state: Arc<RwLock<ViewState<T>>>,
}

impl<T> Default for ReferenceView<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }
}

impl<T> ReferenceView<T> {
    /// Create empty view
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weak handle for loads to write through
    #[must_use]
    pub fn handle(&self) -> ViewHandle<T> {
        ViewHandle {
            state: Arc::downgrade(&self.state),
        }
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> ViewState<T> {
        let state = self.state.read();
        ViewState {
            loading: state.loading,
            error: state.error.clone(),
            items: Arc::clone(&state.items),
        }
    }
}

/// Weak write handle to a [`ReferenceView`]
#[derive(Debug)]
pub struct ViewHandle<T> {
    state: Weak<RwLock<ViewState<T>>>,
}

impl<T> Clone for ViewHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
        }
    }
}

impl<T> ViewHandle<T> {
    /// Whether the view still exists
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.strong_count() > 0
    }

    fn begin(&self) -> bool {
        match self.state.upgrade() {
            Some(state) => {
                state.write().loading = true;
                true
            }
            None => false,
        }
    }

    /// Apply a load result; returns false if the view is gone
    ///
    /// On failure the currently displayed items are kept unless the
    /// result carries a non-empty fallback.
    pub fn apply(&self, loaded: Loaded<T>) -> bool {
        let Some(state) = self.state.upgrade() else {
            tracing::debug!("view dropped before load completed");
            return false;
        };

        let mut state = state.write();
        state.loading = false;
        match loaded.error {
            None => {
                state.items = loaded.items;
                state.error = None;
            }
            Some(error) => {
                if !loaded.items.is_empty() {
                    state.items = loaded.items;
                }
                state.error = Some(error.to_string());
            }
        }
        true
    }

    /// Run a load against this view
    ///
    /// Skips the load entirely if the view is already gone, and discards
    /// the result if it disappears while the load is in flight.
    pub async fn refresh<F>(&self, load: F) -> bool
    where
        F: Future<Output = Loaded<T>>,
    {
        if !self.begin() {
            return false;
        }
        let loaded = load.await;
        self.apply(loaded)
    }
}
