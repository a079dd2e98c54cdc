//! Input rules shared by the store and the snapshot loader.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Error;

/// Number of decimal places balances are kept at.
pub const BALANCE_DP: u32 = 2;

pub fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(())
}

/// A PIN is exactly four ASCII digits. Anything else, including non-ASCII
/// digits, is rejected.
pub fn validate_pin(pin: &str) -> Result<(), Error> {
    if pin.len() != 4 || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidPin);
    }
    Ok(())
}

pub fn validate_balance(balance: Decimal) -> Result<(), Error> {
    if balance.is_sign_negative() && !balance.is_zero() {
        return Err(Error::NegativeBalance);
    }
    Ok(())
}

/// Rounds a balance to [`BALANCE_DP`] places. `-0.00` collapses to zero.
pub fn normalize_balance(balance: Decimal) -> Decimal {
    let mut rounded =
        balance.round_dp_with_strategy(BALANCE_DP, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Parses user-typed balance text, e.g. `"250.5"`.
pub fn parse_balance(text: &str) -> Result<Decimal, Error> {
    let balance: Decimal = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidBalance(text.to_owned()))?;
    validate_balance(balance)?;
    Ok(normalize_balance(balance))
}
