use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::io;
use std::path::Path;

use crate::dto::AccountRecord;
use crate::json_utils::{read_json, write_json};
use crate::validation::{normalize_balance, validate_balance, validate_name, validate_pin};
use crate::Error;

/// Result of [`AccountStore::load`]. A warning means the snapshot could not
/// be used and the store starts out empty.
#[derive(Debug)]
pub struct Loaded {
    pub store: AccountStore,
    pub warning: Option<Error>,
}

#[derive(Debug, Default)]
pub struct AccountStore {
    /// Keyed by holder name, kept in insertion order.
    accounts: IndexMap<String, AccountRecord>,
    dirty: bool,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: IndexMap::new(),
            dirty: false,
        }
    }

    /// Loads the snapshot at `path`. A missing file gives an empty store.
    /// An unreadable or corrupted file also gives an empty store, and the
    /// reason is returned as a warning instead of an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Loaded {
        let path = path.as_ref();
        match read_snapshot(path) {
            Ok(store) => {
                tracing::info!(path = %path.display(), accounts = store.len(), "loaded snapshot");
                Loaded {
                    store,
                    warning: None,
                }
            }
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no snapshot found, starting empty");
                Loaded {
                    store: Self::new(),
                    warning: None,
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "discarding snapshot: {}", err);
                Loaded {
                    store: Self::new(),
                    warning: Some(err),
                }
            }
        }
    }

    /// Writes every record to `path`, replacing the previous snapshot.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        write_json(path, &self.accounts)?;
        self.dirty = false;
        tracing::info!(path = %path.display(), accounts = self.len(), "saved snapshot");
        Ok(())
    }

    pub fn create(&mut self, holder_name: &str, pin: &str, balance: Decimal) -> Result<(), Error> {
        validate_name(holder_name)?;
        if self.accounts.contains_key(holder_name) {
            return Err(Error::DuplicateName(holder_name.to_owned()));
        }
        validate_pin(pin)?;
        validate_balance(balance)?;

        self.accounts.insert(
            holder_name.to_owned(),
            AccountRecord {
                holder_name: holder_name.to_owned(),
                pin: pin.to_owned(),
                balance: normalize_balance(balance),
            },
        );
        self.dirty = true;
        tracing::debug!(holder = holder_name, "account created");
        Ok(())
    }

    pub fn update_pin(&mut self, holder_name: &str, new_pin: &str) -> Result<(), Error> {
        let account = self.get_mut(holder_name)?;
        validate_pin(new_pin)?;
        account.pin = new_pin.to_owned();
        self.dirty = true;
        tracing::debug!(holder = holder_name, "pin updated");
        Ok(())
    }

    pub fn update_balance(&mut self, holder_name: &str, new_balance: Decimal) -> Result<(), Error> {
        let account = self.get_mut(holder_name)?;
        validate_balance(new_balance)?;
        account.balance = normalize_balance(new_balance);
        self.dirty = true;
        tracing::debug!(holder = holder_name, balance = %new_balance, "balance updated");
        Ok(())
    }

    /// Removes an account. Asking the user for confirmation is up to the caller.
    pub fn delete(&mut self, holder_name: &str) -> Result<AccountRecord, Error> {
        let record = self
            .accounts
            .shift_remove(holder_name)
            .ok_or_else(|| Error::NotFound(holder_name.to_owned()))?;
        self.dirty = true;
        tracing::debug!(holder = holder_name, "account deleted");
        Ok(record)
    }

    pub fn get(&self, holder_name: &str) -> Result<&AccountRecord, Error> {
        self.accounts
            .get(holder_name)
            .ok_or_else(|| Error::NotFound(holder_name.to_owned()))
    }

    fn get_mut(&mut self, holder_name: &str) -> Result<&mut AccountRecord, Error> {
        self.accounts
            .get_mut(holder_name)
            .ok_or_else(|| Error::NotFound(holder_name.to_owned()))
    }

    /// Records in insertion order. Each call starts a fresh iteration.
    pub fn list(&self) -> impl Iterator<Item = &AccountRecord> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// True when there are mutations since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Parses the snapshot and checks every record against the store invariants,
/// so a hand-edited file cannot smuggle in a bad PIN or a mismatched key.
fn read_snapshot(path: &Path) -> Result<AccountStore, Error> {
    let accounts: IndexMap<String, AccountRecord> = read_json(path).map_err(|err| match err {
        Error::Json(e) => Error::CorruptSnapshot(e.to_string()),
        other => other,
    })?;

    for (key, record) in &accounts {
        if *key != record.holder_name {
            return Err(Error::CorruptSnapshot(format!(
                "key '{}' does not match account holder '{}'",
                key, record.holder_name
            )));
        }
        validate_name(key)
            .and_then(|_| validate_pin(&record.pin))
            .and_then(|_| validate_balance(record.balance))
            .map_err(|e| Error::CorruptSnapshot(format!("account '{}': {}", key, e)))?;
    }

    Ok(AccountStore {
        accounts,
        dirty: false,
    })
}
