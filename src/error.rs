//! Error types for the keydir library.
//!
//! Lookup misses are not represented here: a search that matches nothing
//! returns an empty result set, not an error.

use thiserror::Error;

/// The main error type for keydir operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Stored data failed a consistency check, e.g. a fingerprint column
    /// that is not 20 bytes
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// A value required at import time could not be derived from the
    /// key material
    #[error("Derivation failed: {0}")]
    Derivation(String),

    /// OpenPGP serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] pgp::errors::Error),

    /// A transaction could not be started or committed
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Underlying database failure
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A specialized Result type for keydir operations.
pub type Result<T> = std::result::Result<T, Error>;
