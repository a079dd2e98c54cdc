//! Storage layer for the account manager. Provides the account record
//! store ([`AccountStore`]) and its snapshot persistence.
//!
//! All access is synchronous and single-threaded; the snapshot file is
//! only touched by [`AccountStore::load`] and [`AccountStore::save`].

mod accounts;

pub use accounts::{AccountStore, Loaded};
