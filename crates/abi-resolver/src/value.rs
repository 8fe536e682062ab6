//! Loosely typed call arguments.

use alloy_primitives::{Address, Bytes, I256, U256, hex};
use std::{collections::BTreeMap, fmt};

const ADDRESS_LEN: usize = 20;

/// Named call arguments, keyed by the declared parameter name.
pub type NamedArgs = BTreeMap<String, ArgValue>;

/// A loosely typed call argument, as supplied by a caller.
///
/// Values carry no declared ABI type. Whether a value fits a parameter is decided by the
/// [`Codec`](crate::Codec), so the same value may be encodable under several overloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Int(I256),
    Uint(U256),
    Text(String),
    Bytes(Bytes),
    Address(Address),
    List(Vec<ArgValue>),
    /// Tuple components keyed by component name.
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Returns `true` if this value looks like an address: an [`Address`], 20 raw bytes, or an
    /// EIP-55 checksummed hex string.
    pub fn is_address_like(&self) -> bool {
        match self {
            Self::Address(_) => true,
            Self::Bytes(bytes) => bytes.len() == ADDRESS_LEN,
            Self::Text(s) => is_checksummed_address(s),
            _ => false,
        }
    }

    /// Human readable name of the value's kind, used in mismatch diagnostics.
    ///
    /// Addresses are reported as `address` whatever their representation.
    pub fn readable_type(&self) -> &'static str {
        if self.is_address_like() {
            return "address";
        }
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Uint(_) => "int",
            Self::Text(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Address(_) => "address",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

pub(crate) fn is_checksummed_address(s: &str) -> bool {
    Address::parse_checksummed(s, None).is_ok()
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => f.write_str(&hex::encode_prefixed(b)),
            Self::Address(a) => write!(f, "{a}"),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Self::Map(values) => {
                f.write_str("{")?;
                for (i, (name, value)) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<U256> for ArgValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(I256::try_from(value).unwrap_or_default())
    }
}

impl From<I256> for ArgValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Bytes> for ArgValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Address> for ArgValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<Vec<Self>> for ArgValue {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl From<BTreeMap<String, Self>> for ArgValue {
    fn from(values: BTreeMap<String, Self>) -> Self {
        Self::Map(values)
    }
}
