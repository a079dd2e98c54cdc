mod csv_utils;
mod dto;
mod error;
mod json_utils;
mod runner;
mod stores;
mod validation;

pub use dto::{AccountRecord, AccountRow};
pub use error::Error;
pub use runner::{run, CommandError};
pub use stores::{AccountStore, Loaded};
pub use validation::parse_balance;

/// Snapshot file the binary reads and writes, relative to the working directory.
pub const DATA_FILE: &str = "bank_data.json";
