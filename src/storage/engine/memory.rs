use std::collections::{hash_map, HashMap, TryReserveError};

use super::Engine;

type Key = Vec<u8>;
type Value = Vec<u8>;

/// A hash map backed storage engine.
#[derive(Debug, Default, Clone)]
pub struct MemoryEngine {
    data: HashMap<Key, Value>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for MemoryEngine {
    type Iter<'a> = Iter<'a>;

    fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = HashMap::new();
        data.try_reserve(capacity)?;
        Ok(MemoryEngine { data })
    }

    fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Option<Vec<u8>> {
        self.data.insert(key.to_vec(), value.to_vec())
    }

    fn delete(&mut self, key: &[u8]) -> bool {
        self.data.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.data.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: hash_map::Iter<'a, Key, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
