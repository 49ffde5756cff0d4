//! The crate-wide error type

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the storage layer and the controller.
///
/// A month that has never been saved is not an error, it loads as an empty
/// month. Only existing-but-unusable data and failed writes are reported, and
/// write failures are always propagated: silently dropping a save would lose
/// the user's tasks.
#[derive(Debug, Error)]
pub enum Error {
    /// An existing month file could not be opened or read.
    #[error("unable to read month file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing month file does not decode as month data.
    #[error("month file {} is malformed: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A month file (or its directory) could not be written or deleted.
    #[error("unable to write month file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The active date cannot change while a task edit is in progress;
    /// the edit must be committed or cancelled first.
    #[error("a task edit is in progress")]
    EditInProgress,
}
