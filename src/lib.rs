//! An in-process key-value backend storing arbitrary byte-string values under
//! byte-string keys.

pub mod backend;
pub mod command;
pub mod error;
pub mod storage;
pub mod terminate;

pub use backend::{Backend, CLOSE_EXIT_CODE};
pub use error::{Error, Op, Result};
pub use storage::engine::{memory::MemoryEngine, Engine};
pub use terminate::{ProcessExit, Terminator};
