//! Free-list of reusable deduplication sets.
//!
//! A [`PooledSet`] is handed out for the lifetime of one retrieval and goes
//! back to its [`SetPool`] when dropped, cleared but with its capacity kept.
//! After the first few frames no retrieval allocates.

use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashSet;

#[derive(Debug)]
pub struct SetPool<K> {
    free: Vec<FxHashSet<K>>,
}

impl<K> Default for SetPool<K> {
    fn default() -> Self {
        Self { free: Vec::new() }
    }
}

impl<K: Eq + Hash> SetPool<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow an empty set. It returns to the pool when the guard drops.
    pub fn acquire(&mut self) -> PooledSet<'_, K> {
        let set = self.free.pop().unwrap_or_default();
        PooledSet {
            set: Some(set),
            pool: self,
        }
    }

    /// Number of idle sets waiting to be reused.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    fn release(&mut self, mut set: FxHashSet<K>) {
        set.clear();
        self.free.push(set);
    }
}

/// Scoped borrow of a set from a [`SetPool`].
pub struct PooledSet<'a, K: Eq + Hash> {
    set: Option<FxHashSet<K>>,
    pool: &'a mut SetPool<K>,
}

impl<K: Eq + Hash> Deref for PooledSet<'_, K> {
    type Target = FxHashSet<K>;

    fn deref(&self) -> &Self::Target {
        // only None while dropping
        self.set.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<K: Eq + Hash> DerefMut for PooledSet<'_, K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.set.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<K: Eq + Hash> Drop for PooledSet<'_, K> {
    fn drop(&mut self) {
        if let Some(set) = self.set.take() {
            self.pool.release(set);
        }
    }
}
