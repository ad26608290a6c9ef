use std::collections::HashSet;
use std::hash::Hash;

use crate::platform::TimerKind;

/// Outstanding timer handles, keyed by `(kind, handle)`.
///
/// The kind is part of the key so families whose handle namespaces overlap stay
/// independent.
#[derive(Debug)]
pub(crate) struct TimerRegistry<H> {
    entries: HashSet<(TimerKind, H)>,
}

impl<H: Clone + Eq + Hash> TimerRegistry<H> {
    pub(crate) fn new() -> Self {
        TimerRegistry {
            entries: HashSet::new(),
        }
    }

    /// Record a handle. Returns false if it was already tracked.
    pub(crate) fn insert(&mut self, kind: TimerKind, handle: H) -> bool {
        self.entries.insert((kind, handle))
    }

    /// Forget a handle. Returns whether it was tracked.
    pub(crate) fn remove(&mut self, kind: TimerKind, handle: &H) -> bool {
        self.entries.remove(&(kind, handle.clone()))
    }

    pub(crate) fn contains(&self, kind: TimerKind, handle: &H) -> bool {
        self.entries.contains(&(kind, handle.clone()))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the registry, yielding every entry once
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (TimerKind, H)> + '_ {
        self.entries.drain()
    }
}
