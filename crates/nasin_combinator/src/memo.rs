//! Packrat memoization and the clearable cache registry.
//!
//! Every parser instance carries a [`ParserId`]. During one parse the
//! [`Memo`] maps `(ParserId, position)` to the type-erased result computed
//! there, so each parser runs at most once per position. The memo also
//! keeps a log of rejections that explain why a branch produced nothing,
//! so they can be reported when the whole parse fails. Tables and other
//! caches register weakly with a [`CacheRegistry`], which can clear all of
//! them at once and silently skips the ones already dropped.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use nasin_foundation::Error;
use tracing::{debug, trace};

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

/// Identity of one parser instance, used as half of a memo key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParserId(u64);

impl ParserId {
    /// Allocates an id no other parser on this thread has.
    ///
    /// Parsers never leave the thread that built them, so the counter is
    /// per thread.
    #[must_use]
    pub fn fresh() -> Self {
        NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            Self(id)
        })
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Memo key: parser identity and input position.
pub type MemoKey = (ParserId, usize);

/// Something whose contents can be discarded in one step.
pub trait Clearable {
    /// Discards every entry.
    fn clear(&self);
}

/// Hit and miss counts of a memo table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Number of stored entries.
    pub entries: usize,
    /// Lookups answered from the table.
    pub hits: usize,
    /// Lookups that had to run the parser.
    pub misses: usize,
}

#[derive(Default)]
struct MemoTable {
    entries: RefCell<HashMap<MemoKey, Box<dyn Any>>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
    violations: RefCell<Vec<Error>>,
}

impl Clearable for MemoTable {
    fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.violations.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }
}

/// A packrat memo table for one input.
///
/// Cloning shares the table. A memo must only ever be used with a single
/// input, since positions from different inputs would collide.
#[derive(Clone, Default)]
pub struct Memo {
    table: Rc<MemoTable>,
}

impl std::fmt::Debug for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo").field("stats", &self.stats()).finish()
    }
}

impl Memo {
    /// Creates an empty, unregistered table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry at `key`, if one of type `V` was stored.
    #[must_use]
    pub fn get<V: Clone + 'static>(&self, key: MemoKey) -> Option<V> {
        let found = self
            .table
            .entries
            .borrow()
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<V>())
            .cloned();
        match found {
            Some(_) => {
                self.table.hits.set(self.table.hits.get() + 1);
                trace!(parser = key.0.as_u64(), position = key.1, "memo hit");
            }
            None => self.table.misses.set(self.table.misses.get() + 1),
        }
        found
    }

    /// Stores `value` at `key`, replacing any previous entry.
    pub fn put<V: 'static>(&self, key: MemoKey, value: V) {
        self.table.entries.borrow_mut().insert(key, Box::new(value));
    }

    /// Returns the stored value at `key`, computing and storing it first if
    /// absent.
    pub fn memoized<V: Clone + 'static>(&self, key: MemoKey, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get::<V>(key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Logs a rejection that removed a candidate during this parse.
    ///
    /// Recorded even when a sibling branch later succeeds, since memoized
    /// results keep only the values once any value exists.
    pub fn record_violation(&self, error: Error) {
        trace!(%error, "recorded violation");
        self.table.violations.borrow_mut().push(error);
    }

    /// Every rejection logged so far, in order.
    #[must_use]
    pub fn violations(&self) -> Vec<Error> {
        self.table.violations.borrow().clone()
    }

    /// Discards every entry and logged rejection.
    pub fn clear(&self) {
        self.table.clear();
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns hit and miss counts.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entries: self.len(),
            hits: self.table.hits.get(),
            misses: self.table.misses.get(),
        }
    }
}

/// A keyed cache that can be registered for bulk clearing.
#[derive(Debug)]
pub struct Cache<K, V> {
    name: &'static str,
    entries: RefCell<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cache name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a copy of the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores an entry.
    pub fn insert(&self, key: K, value: V) {
        self.entries.borrow_mut().insert(key, value);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<K, V> Clearable for Cache<K, V> {
    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Weak set of every cache that must be reset together.
#[derive(Clone, Default)]
pub struct CacheRegistry {
    caches: Rc<RefCell<Vec<Weak<dyn Clearable>>>>,
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

impl CacheRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cache. The registry never keeps it alive.
    pub fn register<C: Clearable + 'static>(&self, cache: &Rc<C>) {
        let weak: Weak<C> = Rc::downgrade(cache);
        let weak: Weak<dyn Clearable> = weak;
        let mut caches = self.caches.borrow_mut();
        caches.retain(|entry| entry.strong_count() > 0);
        caches.push(weak);
    }

    /// Creates a memo table registered with this registry.
    #[must_use]
    pub fn memo(&self) -> Memo {
        let memo = Memo::new();
        self.register(&memo.table);
        memo
    }

    /// Clears every live cache, returning how many were cleared.
    pub fn clear_all(&self) -> usize {
        let live: Vec<Rc<dyn Clearable>> = self
            .caches
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for cache in &live {
            cache.clear();
        }
        self.caches
            .borrow_mut()
            .retain(|entry| entry.strong_count() > 0);
        debug!(cleared = live.len(), "cleared registered caches");
        live.len()
    }

    /// Number of registered caches still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.caches
            .borrow()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}
