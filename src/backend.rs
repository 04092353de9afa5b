use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Op, Result};
use crate::storage::engine::memory::MemoryEngine;
use crate::storage::engine::Engine;
use crate::terminate::{ProcessExit, Terminator};

/// Exit status the host process terminates with on [`Backend::close`].
pub const CLOSE_EXIT_CODE: i32 = 3;

/// The key-value backend.
///
/// A backend starts out uninitialized and only becomes usable after [`Backend::initialize`]
/// allocates its store. It is single-owner: share it across threads only behind an external
/// lock.
pub struct Backend<E: Engine = MemoryEngine> {
    /// `None` until initialized.
    store: Option<E>,
    /// Capacity the store is allocated with on initialization.
    capacity: usize,
    terminator: Box<dyn Terminator>,
}

impl Backend<MemoryEngine> {
    /// Creates an uninitialized backend whose [`close`](Self::close) hands control to
    /// `terminator` instead of exiting the process.
    pub fn new(terminator: impl Terminator + 'static) -> Self {
        Self::with_engine(terminator)
    }
}

impl<E: Engine> Backend<E> {
    pub fn with_engine(terminator: impl Terminator + 'static) -> Self {
        Self {
            store: None,
            capacity: 0,
            terminator: Box::new(terminator),
        }
    }

    /// Pre-size the store allocated by the next [`initialize`](Self::initialize).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Allocates a fresh, empty store, discarding anything stored before.
    pub fn initialize(&mut self) -> Result<()> {
        let store = E::with_capacity(self.capacity).map_err(|_| Error::Initialization)?;
        debug!(capacity = self.capacity, replaced = self.store.is_some(), "initialized store");
        self.store = Some(store);
        Ok(())
    }

    /// Whether [`initialize`](Self::initialize) has allocated a store.
    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// Inserts `key -> value`, silently overwriting an existing entry.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        validate_key(key, Op::Put)?;
        if value.is_empty() {
            return Err(Error::InvalidValue(Op::Put));
        }

        let store = self.store.as_mut().ok_or(Error::Uninitialized(Op::Put))?;
        let overwritten = store.set(key, value).is_some();
        trace!(key_len = key.len(), value_len = value.len(), overwritten, "put");
        Ok(())
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        validate_key(key, Op::Get)?;
        self.store
            .as_ref()
            .and_then(|store| store.get(key))
            .map(<[u8]>::to_vec)
            .ok_or(Error::KeyNotFound(Op::Get))
    }

    /// Removes `key`. Removing an absent key succeeds.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        validate_key(key, Op::Delete)?;
        if let Some(store) = self.store.as_mut() {
            let removed = store.delete(key);
            trace!(key_len = key.len(), removed, "delete");
        }
        Ok(())
    }

    /// Removes every entry. An uninitialized backend is already empty.
    pub fn flush(&mut self) -> Result<()> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };

        let count = store.len();
        store.clear();

        let left = store.len();
        if left > 0 {
            return Err(Error::FlushIncomplete(left));
        }

        debug!(count, "flushed store");
        Ok(())
    }

    /// Lists every entry as a `key value` line. Order is unspecified; the listing is empty
    /// when nothing is stored. Non UTF-8 bytes are shown lossily.
    pub fn stats(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(&String::from_utf8_lossy(key));
            out.push(' ');
            out.push_str(&String::from_utf8_lossy(value));
            out.push('\n');
        }
        out
    }

    /// Terminates the host process with [`CLOSE_EXIT_CODE`].
    ///
    /// Nothing is flushed or cleaned up first. The backend is consumed; with the default
    /// terminator this call never returns.
    pub fn close(mut self) {
        debug!(code = CLOSE_EXIT_CODE, "closing backend");
        self.terminator.terminate(CLOSE_EXIT_CODE);
    }

    /// Number of stored entries. An uninitialized backend holds none.
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, Engine::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry exists for `key`.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.store
            .as_ref()
            .is_some_and(|store| store.contains_key(key))
    }

    /// Iterates over the stored entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.store.iter().flat_map(Engine::iter)
    }
}

impl Default for Backend<MemoryEngine> {
    fn default() -> Self {
        Self::new(ProcessExit)
    }
}

impl<E: Engine> fmt::Debug for Backend<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("initialized", &self.is_initialized())
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

fn validate_key(key: &[u8], op: Op) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey(op));
    }
    Ok(())
}
