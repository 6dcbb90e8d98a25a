//! Error type shared by the dictionary, the search strategies and the harness.

use thiserror::Error;

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a measurement or a sweep.
#[derive(Error, Debug)]
pub enum Error {
    /// A size, count, range or path was rejected before any work started.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A buffer could not be allocated.
    #[error("failed to allocate {what} of {len} elements")]
    Alloc {
        /// Which buffer was being allocated.
        what: &'static str,
        /// Requested element count.
        len: usize,
    },

    /// Insertion into a dictionary that already holds `capacity` keys.
    #[error("dictionary capacity exceeded ({capacity} keys)")]
    CapacityExceeded {
        /// Declared capacity of the dictionary.
        capacity: usize,
    },

    /// Search over a dictionary with no keys (the search range would be empty).
    #[error("search on an empty dictionary")]
    EmptyDictionary,

    /// A sorting routine reported failure.
    #[error("sort failed: {0}")]
    Sort(String),

    /// A saved time table could not be parsed.
    #[error("malformed time table at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// I/O failure while writing or reading a time table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished table could not be moved into place.
    #[error("failed to persist time table: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    pub(crate) fn alloc(what: &'static str, len: usize) -> Self {
        Error::Alloc { what, len }
    }
}
