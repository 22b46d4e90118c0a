//! In-memory implementation of the routing-group contracts.
//!
//! Not an HTTP router: it only records what was registered, in commit
//! order. Tests and doc examples mount controllers against it, and adapter
//! authors can read it as the smallest possible model of the group
//! contract. Prefix and path combine by literal concatenation, so a group
//! at `/posts` registering `/` yields `/posts/`.

use std::sync::{Arc, Mutex, PoisonError};

use http::Method;

use crate::group::{GroupRouter, RouteGroup};

/// One registration committed to a [`MemoryGroup`].
#[derive(Debug)]
pub enum MemoryEntry<R, M> {
    Route {
        method: Method,
        /// Full path, prefix already applied
        path: String,
        handler: R,
    },
    Middleware { handler: M },
}

/// Handler-free view of one committed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Route { method: Method, path: String },
    Middleware,
}

/// Router whose groups record registrations into a shared table.
///
/// Groups write through to the router, so entries committed before a failed
/// mount pass stay visible here — the same observable shape a real router
/// would be left in.
pub struct MemoryRouter<R, M> {
    entries: Arc<Mutex<Vec<MemoryEntry<R, M>>>>,
}

impl<R, M> MemoryRouter<R, M> {
    #[must_use]
    pub fn new() -> Self {
        MemoryRouter {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of everything registered so far, in commit order, without
    /// the handlers.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        self.lock_entries(|entries| {
            entries
                .iter()
                .map(|entry| match entry {
                    MemoryEntry::Route { method, path, .. } => Registration::Route {
                        method: method.clone(),
                        path: path.clone(),
                    },
                    MemoryEntry::Middleware { .. } => Registration::Middleware,
                })
                .collect()
        })
    }

    /// Borrow the raw entries, handlers included.
    pub fn with_entries<T>(&self, f: impl FnOnce(&[MemoryEntry<R, M>]) -> T) -> T {
        self.lock_entries(|entries| f(entries))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries(|entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries<T>(&self, f: impl FnOnce(&Vec<MemoryEntry<R, M>>) -> T) -> T {
        let guard = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl<R, M> Default for MemoryRouter<R, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A recording group opened at a prefix.
#[derive(Debug)]
pub struct MemoryGroup<R, M> {
    prefix: String,
    entries: Arc<Mutex<Vec<MemoryEntry<R, M>>>>,
}

impl<R, M> MemoryGroup<R, M> {
    /// The prefix this group was opened at.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<R, M> RouteGroup for MemoryGroup<R, M> {
    type Route = R;
    type Middleware = M;

    fn register_route(&mut self, method: Method, path: &str, handler: R) {
        let full = format!("{}{}", self.prefix, path);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MemoryEntry::Route {
                method,
                path: full,
                handler,
            });
    }

    fn register_middleware(&mut self, handler: M) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MemoryEntry::Middleware { handler });
    }
}

impl<R, M> GroupRouter for MemoryRouter<R, M> {
    type Group = MemoryGroup<R, M>;

    fn group(&mut self, prefix: &str) -> MemoryGroup<R, M> {
        MemoryGroup {
            prefix: prefix.to_string(),
            entries: Arc::clone(&self.entries),
        }
    }
}
