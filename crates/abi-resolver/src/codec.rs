//! The binary codec capability consumed by the resolver.

use crate::{AbiElement, ArgValue, CodecConfig, EncodingError, NamedArgs, inputs};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::Event;
use alloy_primitives::{Address, B256, I256, Selector, U256, hex};
use auto_impl::auto_impl;

/// Type checking, encoding and decoding of ABI values.
///
/// Only [`coerce`](Self::coerce) and [`decode`](Self::decode) are required, everything else has
/// a default built on top of them. Implementations are expected to be read-only so a single codec
/// can be shared across threads.
#[auto_impl(&, Box, Arc)]
pub trait Codec {
    /// Converts a loosely typed value into a value of the given ABI type.
    ///
    /// Returns `None` if the value cannot be represented at that type.
    fn coerce(&self, ty: &str, value: &ArgValue) -> Option<DynSolValue>;

    /// ABI-decodes `data` as a sequence of values of the given types.
    fn decode(&self, types: &[String], data: &[u8]) -> Result<Vec<DynSolValue>, EncodingError>;

    /// Returns `true` if `value` can be encoded at the given ABI type.
    fn is_encodable(&self, ty: &str, value: &ArgValue) -> bool {
        self.coerce(ty, value).is_some()
    }

    /// Orders positional and named arguments by the element's declared inputs.
    fn normalize_inputs(
        &self,
        element: &AbiElement,
        args: &[ArgValue],
        named: &NamedArgs,
    ) -> Result<Vec<ArgValue>, EncodingError> {
        inputs::normalize_inputs(element, args, named)
    }

    /// Reshapes normalized arguments to the element's declared tuple structure, returning the
    /// canonical input types alongside the aligned values.
    fn align_inputs(
        &self,
        element: &AbiElement,
        args: Vec<ArgValue>,
    ) -> Result<(Vec<String>, Vec<ArgValue>), EncodingError> {
        inputs::align_inputs(element, args)
    }

    /// Returns the 4-byte selector of a function, error or event.
    ///
    /// Constructors, fallback and receive functions have no selector.
    fn selector(&self, element: &AbiElement) -> Option<Selector> {
        match element {
            AbiElement::Function(f) => Some(f.selector()),
            AbiElement::Error(e) => Some(e.selector()),
            AbiElement::Event(e) => Some(Selector::from_slice(&e.selector()[..4])),
            AbiElement::Constructor(_) | AbiElement::Fallback(_) | AbiElement::Receive(_) => None,
        }
    }

    /// Returns the event's signature hash, i.e. the first topic of its non-anonymous logs.
    fn signature_hash(&self, event: &Event) -> B256 {
        event.selector()
    }

    /// ABI-encodes aligned values as a parameter sequence.
    fn encode(&self, types: &[String], values: &[ArgValue]) -> Result<Vec<u8>, EncodingError> {
        if types.len() != values.len() {
            return Err(EncodingError::ArgumentCount {
                expected: types.len(),
                actual: values.len(),
            });
        }
        let tokens = std::iter::zip(types, values)
            .map(|(ty, value)| {
                self.coerce(ty, value).ok_or_else(|| EncodingError::ValueMismatch {
                    ty: ty.clone(),
                    actual: value.readable_type().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DynSolValue::Tuple(tokens).abi_encode_params())
    }
}

/// The default [`Codec`], backed by `alloy-dyn-abi`.
///
/// With strict bytes type checking, `bytesN` values must be exactly `N` bytes long. Otherwise
/// shorter values are accepted and right-padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DynAbiCodec {
    strict_bytes_type_checking: bool,
}

impl Default for DynAbiCodec {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

impl DynAbiCodec {
    pub const fn new(strict_bytes_type_checking: bool) -> Self {
        Self { strict_bytes_type_checking }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.strict_bytes_type_checking)
    }

    pub const fn is_strict(&self) -> bool {
        self.strict_bytes_type_checking
    }

    /// Recursively coerces `value` into a [`DynSolValue`] of type `ty`.
    pub fn coerce_value(&self, ty: &DynSolType, value: &ArgValue) -> Option<DynSolValue> {
        match (ty, value) {
            (DynSolType::Bool, ArgValue::Bool(b)) => Some(DynSolValue::Bool(*b)),
            (DynSolType::Address, value) => address_of(value).map(DynSolValue::Address),
            (DynSolType::Uint(bits), ArgValue::Uint(u)) => {
                fits_unsigned(*u, *bits).then_some(DynSolValue::Uint(*u, *bits))
            }
            (DynSolType::Uint(bits), ArgValue::Int(i)) => {
                let u = i.into_raw();
                (!i.is_negative() && fits_unsigned(u, *bits)).then_some(DynSolValue::Uint(u, *bits))
            }
            (DynSolType::Int(bits), ArgValue::Int(i)) => {
                fits_signed(*i, *bits).then_some(DynSolValue::Int(*i, *bits))
            }
            (DynSolType::Int(bits), ArgValue::Uint(u)) => {
                let i = I256::try_from(*u).ok()?;
                fits_signed(i, *bits).then_some(DynSolValue::Int(i, *bits))
            }
            (DynSolType::FixedBytes(size), value) => {
                let bytes = bytes_of(value)?;
                if bytes.len() > *size || (self.strict_bytes_type_checking && bytes.len() != *size)
                {
                    return None;
                }
                let mut word = B256::ZERO;
                word.0[..bytes.len()].copy_from_slice(&bytes);
                Some(DynSolValue::FixedBytes(word, *size))
            }
            (DynSolType::Bytes, value) => bytes_of(value).map(DynSolValue::Bytes),
            (DynSolType::String, ArgValue::Text(s)) => Some(DynSolValue::String(s.clone())),
            (DynSolType::Function, ArgValue::Bytes(b)) if b.len() == 24 => {
                Some(DynSolValue::Function(alloy_primitives::Function::from_slice(b)))
            }
            (DynSolType::Array(inner), ArgValue::List(values)) => {
                self.coerce_all(inner, values).map(DynSolValue::Array)
            }
            (DynSolType::FixedArray(inner, len), ArgValue::List(values)) if values.len() == *len => {
                self.coerce_all(inner, values).map(DynSolValue::FixedArray)
            }
            (DynSolType::Tuple(types), ArgValue::List(values)) if types.len() == values.len() => {
                std::iter::zip(types, values)
                    .map(|(ty, value)| self.coerce_value(ty, value))
                    .collect::<Option<Vec<_>>>()
                    .map(DynSolValue::Tuple)
            }
            _ => None,
        }
    }

    fn coerce_all(&self, ty: &DynSolType, values: &[ArgValue]) -> Option<Vec<DynSolValue>> {
        values.iter().map(|value| self.coerce_value(ty, value)).collect()
    }
}

impl Codec for DynAbiCodec {
    fn coerce(&self, ty: &str, value: &ArgValue) -> Option<DynSolValue> {
        let ty = DynSolType::parse(ty).ok()?;
        self.coerce_value(&ty, value)
    }

    fn decode(&self, types: &[String], data: &[u8]) -> Result<Vec<DynSolValue>, EncodingError> {
        let types = types
            .iter()
            .map(|ty| {
                DynSolType::parse(ty)
                    .map_err(|source| EncodingError::InvalidType { ty: ty.clone(), source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match DynSolType::Tuple(types).abi_decode_params(data)? {
            DynSolValue::Tuple(values) => Ok(values),
            value => Ok(vec![value]),
        }
    }
}

fn address_of(value: &ArgValue) -> Option<Address> {
    match value {
        ArgValue::Address(address) => Some(*address),
        ArgValue::Bytes(bytes) if bytes.len() == 20 => Some(Address::from_slice(bytes)),
        // only checksummed strings, lowercase hex is too easily a typo
        ArgValue::Text(s) => Address::parse_checksummed(s, None).ok(),
        _ => None,
    }
}

fn bytes_of(value: &ArgValue) -> Option<Vec<u8>> {
    match value {
        ArgValue::Bytes(bytes) => Some(bytes.to_vec()),
        ArgValue::Text(s) if s.starts_with("0x") => hex::decode(s).ok(),
        _ => None,
    }
}

fn fits_unsigned(value: U256, bits: usize) -> bool {
    value.bit_len() <= bits
}

fn fits_signed(value: I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let bound = U256::from(1) << (bits - 1);
    let abs = value.unsigned_abs();
    if value.is_negative() { abs <= bound } else { abs < bound }
}
