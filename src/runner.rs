use rust_decimal::Decimal;
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::{
    csv_utils::{split_fields, write_csv},
    dto::AccountRow,
    validation::parse_balance,
    AccountStore,
};

const HELP: &str = "Commands:
  create NAME PIN BALANCE      create an account
  list                         show all accounts
  update-pin NAME PIN          change an account's PIN
  update-balance NAME BALANCE  change an account's balance
  delete NAME                  delete an account (asks for confirmation)
  save                         write all accounts to disk
  save-exit                    save, then end the session
  exit                         end the session without saving
Names containing spaces must be double-quoted.";

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list of commands")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("could not parse command: {0}")]
    Syntax(#[from] csv::Error),
    #[error(transparent)]
    Account(#[from] crate::Error),
}

#[derive(Debug, PartialEq)]
enum Command {
    Create {
        name: String,
        pin: String,
        balance: Decimal,
    },
    List,
    UpdatePin {
        name: String,
        pin: String,
    },
    UpdateBalance {
        name: String,
        balance: Decimal,
    },
    Delete {
        name: String,
    },
    Save,
    SaveExit,
    Help,
    Exit,
}

impl Command {
    /// Parses one input line. Returns `None` for a blank line.
    fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let fields = split_fields(line)?;
        let Some((name, args)) = fields.split_first() else {
            return Ok(None);
        };
        let command = match (name.as_str(), args) {
            ("create", [holder, pin, balance]) => Command::Create {
                name: holder.clone(),
                pin: pin.clone(),
                balance: parse_balance(balance)?,
            },
            ("create", _) => return Err(CommandError::Usage("create NAME PIN BALANCE")),
            ("list", []) => Command::List,
            ("update-pin", [holder, pin]) => Command::UpdatePin {
                name: holder.clone(),
                pin: pin.clone(),
            },
            ("update-pin", _) => return Err(CommandError::Usage("update-pin NAME PIN")),
            ("update-balance", [holder, balance]) => Command::UpdateBalance {
                name: holder.clone(),
                balance: parse_balance(balance)?,
            },
            ("update-balance", _) => {
                return Err(CommandError::Usage("update-balance NAME BALANCE"))
            }
            ("delete", [holder]) => Command::Delete {
                name: holder.clone(),
            },
            ("delete", _) => return Err(CommandError::Usage("delete NAME")),
            ("save", []) => Command::Save,
            ("save-exit", []) => Command::SaveExit,
            ("help", _) => Command::Help,
            ("exit" | "quit", []) => Command::Exit,
            ("list" | "save" | "save-exit" | "exit" | "quit", _) => {
                return Err(CommandError::Usage("list | save | save-exit | exit"))
            }
            (other, _) => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

/// Runs an interactive account session: loads the snapshot at `store_path`,
/// applies commands read line by line from `input`, and writes replies to
/// `output`. Accounts are only persisted by an explicit `save` command.
///
/// # Arguments
/// * `store_path` - Path to the JSON snapshot file
/// * `input` - Where commands come from (e.g. stdin)
/// * `output` - Where replies and listings go (e.g. stdout)
///
/// # Errors
/// Bad commands and rejected operations are reported on `output` and the
/// session continues. Returns an error only if:
/// * Reading from `input` fails
/// * Writing to `output` fails
pub fn run<P, R, W>(store_path: P, input: R, mut output: W) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    R: BufRead,
    W: Write,
{
    let store_path = store_path.as_ref();
    let loaded = AccountStore::load(store_path);
    let mut store = loaded.store;
    if let Some(warning) = loaded.warning {
        writeln!(output, "Warning: {}", warning)?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let command = match Command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "Error: {}", err)?;
                continue;
            }
        };

        let result = match command {
            Command::Create { name, pin, balance } => store
                .create(&name, &pin, balance)
                .map(|_| format!("Account for {} added successfully!", name)),
            Command::List => {
                if store.is_empty() {
                    writeln!(output, "No accounts found.")?;
                } else {
                    write_csv(&mut output, store.list().map(AccountRow::from))?;
                }
                continue;
            }
            Command::UpdatePin { name, pin } => store
                .update_pin(&name, &pin)
                .map(|_| format!("PIN updated for {}", name)),
            Command::UpdateBalance { name, balance } => store
                .update_balance(&name, balance)
                .map(|_| format!("Balance updated for {}", name)),
            Command::Delete { name } => {
                // Check first so we don't ask to confirm deleting nothing
                if let Err(err) = store.get(&name) {
                    writeln!(output, "Error: {}", err)?;
                    continue;
                }
                writeln!(
                    output,
                    "Are you sure you want to delete account '{}'? [y/N]",
                    name
                )?;
                output.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if is_confirmation(&answer) {
                    store
                        .delete(&name)
                        .map(|_| format!("Account '{}' deleted successfully!", name))
                } else {
                    Ok("Deletion cancelled.".to_owned())
                }
            }
            Command::Save => store
                .save(store_path)
                .map(|_| format!("Data saved to {} successfully!", store_path.display())),
            Command::SaveExit => match store.save(store_path) {
                Ok(()) => {
                    writeln!(
                        output,
                        "Data saved to {} successfully!",
                        store_path.display()
                    )?;
                    break;
                }
                Err(err) => Err(err),
            },
            Command::Help => Ok(HELP.to_owned()),
            Command::Exit => break,
        };

        match result {
            Ok(message) => writeln!(output, "{}", message)?,
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }

    if store.is_dirty() {
        writeln!(output, "Unsaved changes discarded.")?;
    }
    output.flush()?;
    Ok(())
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
