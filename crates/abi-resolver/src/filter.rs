//! Matching of non-indexed event data.

use crate::{ArgValue, Codec, ResolveError};
use alloy_dyn_abi::{DynSolType, DynSolValue};

/// A filter over the non-indexed arguments of an event log.
///
/// Each entry pairs an ABI type with the values the decoded argument may take. An entry without
/// values matches anything at its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataFilter {
    entries: Vec<(String, Option<Vec<ArgValue>>)>,
}

impl DataFilter {
    pub fn new(entries: Vec<(String, Option<Vec<ArgValue>>)>) -> Self {
        Self { entries }
    }

    /// Returns `true` if no entry restricts its argument.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, values)| values.is_none())
    }

    pub fn types(&self) -> Vec<String> {
        self.entries.iter().map(|(ty, _)| ty.clone()).collect()
    }

    /// Decodes `data` and checks every restricted argument against its accepted values.
    ///
    /// Accepted values are tried in order until one matches. A value reached before that which
    /// cannot be encoded at its entry's type is an error, not a non-match.
    pub fn matches<C: Codec + ?Sized>(&self, codec: &C, data: &[u8]) -> Result<bool, ResolveError> {
        if self.is_empty() {
            return Ok(true);
        }

        let decoded = codec.decode(&self.types(), data)?;
        for ((ty, accepted), value) in self.entries.iter().zip(decoded) {
            let Some(accepted) = accepted else { continue };
            let value = normalize_data_value(ty, value);
            let mut matched = false;
            for candidate in accepted {
                let Some(expected) = codec.coerce(ty, candidate) else {
                    return Err(ResolveError::InvalidFilterValue {
                        ty: ty.clone(),
                        value: candidate.to_string(),
                    });
                };
                if expected == value {
                    matched = true;
                    break;
                }
            }
            if !matched {
                trace!(%ty, ?value, "data filter rejected log");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Converts byte strings decoded for `string` types, and arrays of any dimension of them, into
/// text.
///
/// Bytes that are not valid UTF-8 are returned unchanged, as is any value of an unparsable type.
pub fn normalize_data_value(ty: &str, value: DynSolValue) -> DynSolValue {
    match DynSolType::parse(ty) {
        Ok(ty) => normalize_value(&ty, value),
        Err(_) => value,
    }
}

fn normalize_value(ty: &DynSolType, value: DynSolValue) -> DynSolValue {
    match (ty, value) {
        (DynSolType::String, DynSolValue::Bytes(bytes)) => match String::from_utf8(bytes) {
            Ok(s) => DynSolValue::String(s),
            Err(err) => DynSolValue::Bytes(err.into_bytes()),
        },
        (DynSolType::Array(inner), DynSolValue::Array(values)) => {
            DynSolValue::Array(normalize_all(inner, values))
        }
        (DynSolType::FixedArray(inner, _), DynSolValue::FixedArray(values)) => {
            DynSolValue::FixedArray(normalize_all(inner, values))
        }
        (_, value) => value,
    }
}

fn normalize_all(ty: &DynSolType, values: Vec<DynSolValue>) -> Vec<DynSolValue> {
    values.into_iter().map(|value| normalize_value(ty, value)).collect()
}
