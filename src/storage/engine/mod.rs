pub mod memory;

use std::collections::TryReserveError;

/// A simple trait for allowing pluggable key/value containers behind the backend.
///
/// Engines store owned copies of keys and values. They do no validation; empty keys and
/// values are rejected before they reach an engine.
pub trait Engine {
    type Iter<'a>: Iterator<Item = (&'a [u8], &'a [u8])>
    where
        Self: 'a;

    /// Allocate an empty container with room for at least `capacity` entries.
    fn with_capacity(capacity: usize) -> Result<Self, TryReserveError>
    where
        Self: Sized;

    fn get(&self, key: &[u8]) -> Option<&[u8]>;

    /// Insert or overwrite. Returns the previous value, if any.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Option<Vec<u8>>;

    /// Returns `true` if the key was present.
    fn delete(&mut self, key: &[u8]) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over all entries. Order is unspecified.
    fn iter(&self) -> Self::Iter<'_>;
}
