//! Ledger identifiers and entity key derivation

use crate::{Result, TallyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account address, normalised to lowercase `0x`-prefixed hex
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub const ZERO: &'static str = "0x0000000000000000000000000000000000000000";

    /// Parse and normalise an address
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| {
                TallyError::EventDecode(format!("address '{}' is missing the 0x prefix", raw))
            })?;

        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TallyError::EventDecode(format!(
                "address '{}' is not hex",
                raw
            )));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self(Self::ZERO.to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TallyError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Ledger-assigned record ID (bet or task)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LedgerId(pub u64);

impl LedgerId {
    /// Entity key: lowercase hex without leading zeros (`0x0` for zero)
    pub fn key(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl From<u64> for LedgerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Key of a participation row: `{user}-{record}`
pub fn pair_key(user: &Address, record: LedgerId) -> String {
    format!("{}-{}", user, record.key())
}
