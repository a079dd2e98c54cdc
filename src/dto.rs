use rust_decimal::Decimal;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::normalize_balance;

/// One account as it lives in the store and in the snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    #[serde(rename = "account_holder")]
    pub holder_name: String,
    pub pin: String,
    #[serde(
        serialize_with = "rust_decimal::serde::arbitrary_precision::serialize",
        deserialize_with = "deserialize_balance_2dp"
    )]
    pub balance: Decimal,
}

fn deserialize_balance_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    // Only JSON numbers are accepted; the digits are kept exactly as written.
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(normalize_balance)
        .map_err(|e| D::Error::custom(format!("invalid balance {}: {}", text, e)))
}

/// A row of the `list` output.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountRow {
    pub account_holder: String,
    pub pin: String,
    pub balance: String,
}

impl From<&AccountRecord> for AccountRow {
    fn from(record: &AccountRecord) -> Self {
        Self {
            account_holder: record.holder_name.clone(),
            pin: record.pin.clone(),
            balance: format!("{:.2}", record.balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_record() {
        let record: AccountRecord = serde_json::from_str(
            r#"{"account_holder": "Alice", "pin": "1234", "balance": 100.0}"#,
        )
        .unwrap();
        assert_eq!(
            record,
            AccountRecord {
                holder_name: "Alice".into(),
                pin: "1234".into(),
                balance: dec!(100.00),
            }
        );
    }

    #[test]
    fn test_parse_integer_balance() {
        let record: AccountRecord =
            serde_json::from_str(r#"{"account_holder": "Bob", "pin": "0000", "balance": 7}"#)
                .unwrap();
        assert_eq!(record.balance, dec!(7));
    }

    #[test]
    fn test_balance_written_as_number() {
        let record = AccountRecord {
            holder_name: "Alice".into(),
            pin: "1234".into(),
            balance: dec!(250.5),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["account_holder"], "Alice");
        assert_eq!(value["pin"], "1234");
        assert_eq!(value["balance"].as_f64(), Some(250.5));
    }

    #[test]
    fn test_parse_missing_field() {
        let result = serde_json::from_str::<AccountRecord>(r#"{"account_holder": "Alice"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_string_balance_rejected() {
        for balance in [r#""12.5""#, r#""lots""#, "null", "[1]"] {
            let json = format!(
                r#"{{"account_holder": "Alice", "pin": "1234", "balance": {}}}"#,
                balance
            );
            assert!(
                serde_json::from_str::<AccountRecord>(&json).is_err(),
                "balance {} should be rejected",
                balance
            );
        }
    }

    #[test]
    fn test_large_balance_keeps_every_digit() {
        let record = AccountRecord {
            holder_name: "Big".into(),
            pin: "1234".into(),
            balance: dec!(12345678901234567.89),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""balance":12345678901234567.89"#), "{}", json);

        let parsed: AccountRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_parse_scientific_balance() {
        let record: AccountRecord = serde_json::from_str(
            r#"{"account_holder": "Alice", "pin": "1234", "balance": 1.5e2}"#,
        )
        .unwrap();
        assert_eq!(record.balance, dec!(150));
    }

    #[test]
    fn test_row_formats_two_decimals() {
        let record = AccountRecord {
            holder_name: "Alice".into(),
            pin: "1234".into(),
            balance: dec!(250.5),
        };
        assert_eq!(
            AccountRow::from(&record),
            AccountRow {
                account_holder: "Alice".into(),
                pin: "1234".into(),
                balance: "250.50".into(),
            }
        );
    }
}
