use std::fmt;

/// The backend operation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Put,
    Get,
    Delete,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Put => "Put",
            Op::Get => "Get",
            Op::Delete => "Delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("error New(): Could not create new database")]
    Initialization,

    #[error("error {0}(): invalid key")]
    InvalidKey(Op),

    #[error("error {0}(): invalid value")]
    InvalidValue(Op),

    #[error("error {0}(): key does not exist")]
    KeyNotFound(Op),

    /// Entries still present after a flush.
    #[error("error Flush(): could not delete all entries in database ({0} left)")]
    FlushIncomplete(usize),

    #[error("error {0}(): database not initialized")]
    Uninitialized(Op),
}

pub type Result<T> = std::result::Result<T, Error>;
