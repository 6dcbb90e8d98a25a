//! Fixed-capacity array of integer keys.
//!
//! The backing store is allocated once, at the declared capacity, and never
//! grows. In [`Order::Sorted`] mode every insertion shifts the larger keys one
//! slot to the right and drops the new key into the gap, so the occupied
//! prefix stays non-decreasing. In [`Order::Unsorted`] mode keys are appended
//! in arrival order.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::search::{SearchOutcome, SearchStrategy};
use crate::Key;

/// Insertion discipline, fixed when the dictionary is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Keep the occupied prefix sorted ascending.
    #[default]
    Sorted,
    /// Keep keys in insertion order.
    Unsorted,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Sorted => "sorted",
            Order::Unsorted => "unsorted",
        })
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sorted" => Ok(Order::Sorted),
            "unsorted" => Ok(Order::Unsorted),
            other => Err(format!("unknown order `{other}` (expected sorted or unsorted)")),
        }
    }
}

/// A capacity-bounded key store.
#[derive(Debug, Clone)]
pub struct Dictionary {
    table: Vec<Key>,
    capacity: usize,
    order: Order,
}

impl Dictionary {
    /// Create an empty dictionary holding at most `capacity` keys.
    ///
    /// Fails with [`Error::Alloc`] if the store cannot be reserved.
    pub fn new(capacity: usize, order: Order) -> Result<Self> {
        let mut table = Vec::new();
        table
            .try_reserve_exact(capacity)
            .map_err(|_| Error::alloc("dictionary table", capacity))?;
        Ok(Self {
            table,
            capacity,
            order,
        })
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.table.len() >= self.capacity
    }

    /// Declared capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// The occupied part of the backing store.
    #[inline]
    pub fn as_slice(&self) -> &[Key] {
        &self.table
    }

    /// Insert one key.
    ///
    /// Fails with [`Error::CapacityExceeded`] when the dictionary is full; the
    /// store is left unchanged in that case.
    pub fn insert(&mut self, key: Key) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        match self.order {
            Order::Unsorted => self.table.push(key),
            Order::Sorted => {
                // Open a slot at the end, then walk it left past every larger key.
                self.table.push(key);
                let mut j = self.table.len() - 1;
                while j > 0 && self.table[j - 1] > key {
                    self.table[j] = self.table[j - 1];
                    j -= 1;
                }
                self.table[j] = key;
            }
        }
        Ok(())
    }

    /// Insert every key of `keys` in order, stopping at the first failure.
    ///
    /// Keys inserted before the failure stay in the dictionary. Returns the
    /// number of keys inserted.
    pub fn bulk_insert(&mut self, keys: &[Key]) -> Result<usize> {
        for (inserted, &key) in keys.iter().enumerate() {
            if let Err(e) = self.insert(key) {
                tracing::debug!(inserted, capacity = self.capacity, "bulk insertion stopped");
                return Err(e);
            }
        }
        Ok(keys.len())
    }

    /// Look `key` up over the whole occupied range with `strategy`.
    ///
    /// Whether the strategy suits the order mode is not checked: binary search
    /// over an unsorted dictionary returns unreliable positions. Strategies
    /// that reorder their input reorder this dictionary.
    pub fn search<S>(&mut self, key: Key, strategy: &S) -> Result<SearchOutcome>
    where
        S: SearchStrategy + ?Sized,
    {
        if self.table.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        let last = self.table.len() - 1;
        strategy.search(&mut self.table, 0..=last, key)
    }
}
