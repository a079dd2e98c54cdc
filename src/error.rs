//! Errors for the account record store.
//!
//! Most variants are validation failures on caller input:
//! - Name errors (empty, already taken, unknown)
//! - PIN and balance format errors
//!
//! The remaining ones cover the snapshot file: it may be corrupted, or the
//! underlying read/write may fail. None of these leave the store unusable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("account holder name cannot be empty")]
    EmptyName,
    #[error("account for '{0}' already exists")]
    DuplicateName(String),
    #[error("PIN must be exactly 4 digits")]
    InvalidPin,
    #[error("balance cannot be negative")]
    NegativeBalance,
    #[error("invalid balance '{0}'")]
    InvalidBalance(String),
    #[error("account for '{0}' does not exist")]
    NotFound(String),
    #[error("snapshot file was empty or corrupted ({0}), starting fresh")]
    CorruptSnapshot(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
