//! Monetary amounts and counters
//!
//! Amounts are signed because balance deltas go negative while a stake is at
//! risk. They are serialized as decimal strings so JSON consumers never lose
//! precision.

use crate::{Result, TallyError};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Signed amount in the ledger's smallest unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(value: i128) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, failing on overflow
    pub fn checked_add(self, other: Amount) -> Result<Amount> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or_else(|| TallyError::Overflow(format!("{} + {}", self, other)))
    }

    /// Subtract two amounts, failing on overflow
    pub fn checked_sub(self, other: Amount) -> Result<Amount> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or_else(|| TallyError::Overflow(format!("{} - {}", self, other)))
    }
}

impl From<i128> for Amount {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value as i128)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value as i128)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i128>()
            .map(Amount)
            .map_err(|e| TallyError::Serialization(format!("invalid amount '{}': {}", s, e)))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<Amount, E> {
        Ok(Amount(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Amount, E> {
        i128::try_from(v)
            .map(Amount)
            .map_err(|_| E::custom(format!("amount {} out of range", v)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Increment a counter by one, failing on overflow
pub fn bump(counter: &mut u64) -> Result<()> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| TallyError::Overflow(format!("counter {} + 1", counter)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        let a = Amount::from(100u64);
        let b = Amount::from(40u64);

        assert_eq!(a.checked_add(b).unwrap(), Amount::new(140));
        assert_eq!(b.checked_sub(a).unwrap(), Amount::new(-60));
        assert!(Amount::new(i128::MAX).checked_add(Amount::new(1)).is_err());
        assert!(Amount::new(i128::MIN).checked_sub(Amount::new(1)).is_err());
    }

    #[test]
    fn test_serde_accepts_strings_and_integers() {
        let from_str: Amount = serde_json::from_str("\"-250\"").unwrap();
        let from_int: Amount = serde_json::from_str("250").unwrap();

        assert_eq!(from_str, Amount::new(-250));
        assert_eq!(from_int, Amount::new(250));
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"-250\"");
    }

    #[test]
    fn test_large_amount_survives_json() {
        // 10^30, well past u64
        let big: Amount = "1000000000000000000000000000000".parse().unwrap();
        let json = serde_json::to_string(&big).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);
    }

    #[test]
    fn test_bump() {
        let mut counter = 0u64;
        bump(&mut counter).unwrap();
        bump(&mut counter).unwrap();
        assert_eq!(counter, 2);

        let mut full = u64::MAX;
        assert!(bump(&mut full).is_err());
        assert_eq!(full, u64::MAX);
    }
}
