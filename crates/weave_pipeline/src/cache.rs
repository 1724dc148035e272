//! Generational memo tables for the per-target stages.
//!
//! Each [`StageCache`] keeps two generations. Entries used during a run live
//! in the current generation; everything else sits in the previous one and is
//! dropped when the next run begins. A stage's output is therefore retained
//! for exactly as long as some target still produces the same input.

use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use serde::Serialize;

/// Hit and miss counts of one stage during one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that ran the stage.
    pub misses: usize,
}

impl StageStats {
    /// Total lookups.
    pub fn lookups(&self) -> usize {
        self.hits + self.misses
    }
}

/// A concurrent memo table keyed on input equality.
pub struct StageCache<K, V> {
    name: &'static str,
    current: DashMap<K, V>,
    previous: DashMap<K, V>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K, V> StageCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache for the named stage.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: DashMap::new(),
            previous: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Starts a new run: evicts entries the last run did not use and resets
    /// the counters.
    pub fn begin_run(&mut self) {
        let evicted = self.previous.len();
        self.previous = std::mem::take(&mut self.current);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        tracing::trace!(
            stage = self.name,
            evicted,
            retained = self.previous.len(),
            "cache generation rotated"
        );
    }

    /// Returns the cached output for `key`, computing and storing it on a
    /// miss. The flag is `true` on a hit.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce(&K) -> V) -> (V, bool) {
        if let Some(value) = self.current.get(&key).map(|entry| entry.value().clone()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return (value, true);
        }
        if let Some((key, value)) = self.previous.remove(&key) {
            self.current.insert(key, value.clone());
            self.hits.fetch_add(1, Ordering::Relaxed);
            return (value, true);
        }

        let value = compute(&key);
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.current.insert(key, value.clone());
        (value, false)
    }

    /// Ends a cancelled run without evicting anything the last completed run
    /// left behind.
    pub fn abandon_run(&mut self) {
        for (key, value) in std::mem::take(&mut self.previous) {
            self.current.entry(key).or_insert(value);
        }
    }

    /// Counters since the last [`begin_run`](Self::begin_run).
    pub fn stats(&self) -> StageStats {
        StageStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of retained entries across both generations.
    pub fn len(&self) -> usize {
        self.current.len() + self.previous.len()
    }

    /// Returns `true` when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry and counter.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
