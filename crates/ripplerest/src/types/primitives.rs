/*
[INPUT]:  Raw address, currency and numeric values from callers or the wire
[OUTPUT]: Address, Currency and Quantity wrappers with serde support
[POS]:    Data layer - primitive value types shared by all entities
[UPDATE]: When adding validation to addresses or currency codes
*/

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Code of the network's native asset.
pub const NATIVE_CURRENCY: &str = "XRP";

/// A ledger account address.
///
/// Addresses are opaque: no checksum or alphabet validation is done here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A three-letter currency code or a 160-bit hex currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The network's native asset.
    pub fn native() -> Self {
        Self(NATIVE_CURRENCY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_native(&self) -> bool {
        self.0.eq_ignore_ascii_case(NATIVE_CURRENCY)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! impl_string_newtype {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&$name> for $name {
            fn from(value: &$name) -> Self {
                value.clone()
            }
        }
    };
}

impl_string_newtype!(Address);
impl_string_newtype!(Currency);

/// A decimal quantity kept in its textual form.
///
/// Always serialized as a JSON string so no precision is lost to floating
/// point. Deserialization accepts either a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl Quantity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the quantity as a decimal.
    ///
    /// Values beyond `Decimal`'s 28 digits of scale (possible for issued
    /// currencies) fail to parse; the textual form is still preserved.
    pub fn to_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.0).or_else(|_| Decimal::from_scientific(&self.0))
    }

    pub fn is_zero(&self) -> bool {
        self.to_decimal().map(|d| d.is_zero()).unwrap_or(false)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Ok(Self(raw)),
            serde_json::Value::Number(number) => Ok(Self(number.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a decimal string or number, got {other}"
            ))),
        }
    }
}
