//! Errors produced while resolving ABI elements and validating logs.

use crate::{Diagnosis, ElementKind};
use alloy_primitives::{B256, Bytes, hex};
use std::fmt;

/// Errors that can occur while resolving an ABI element or validating event topics.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unsupported function identifier")]
    InvalidIdentifier,
    #[error("no {0} was found in the contract ABI")]
    NotFound(ElementKind),
    #[error(transparent)]
    MismatchedAbi(Mismatch),
    #[error("an event name is required in order to match an event ABI")]
    MissingEventName,
    #[error("multiple events named `{0}` match the given argument names")]
    MultipleEvents(String),
    #[error("invalid log topic {topic:?}: {reason}")]
    InvalidTopic { topic: String, reason: hex::FromHexError },
    #[error("filter value {value} is of the wrong ABI type, expected a `{ty}` value")]
    InvalidFilterValue { ty: String, value: String },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl ResolveError {
    /// Returns the mismatch details if this is a [`ResolveError::MismatchedAbi`].
    pub fn as_mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::MismatchedAbi(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}

impl From<Mismatch> for ResolveError {
    fn from(mismatch: Mismatch) -> Self {
        Self::MismatchedAbi(mismatch)
    }
}

/// The ABI did not match the call or log it was applied to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// Zero or several elements matched the identifier and arguments.
    Resolution(Box<Diagnosis>),
    /// A non-anonymous event log carried no topics at all.
    MissingTopics,
    /// The first topic is not the event's signature hash.
    SignatureMismatch { expected: B256, actual: Bytes },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution(diagnosis) => fmt::Display::fmt(diagnosis, f),
            Self::MissingTopics => {
                f.write_str("expected non-anonymous event to have 1 or more topics")
            }
            Self::SignatureMismatch { expected, actual } => write!(
                f,
                "the event signature did not match the provided ABI: expected {expected}, got {}",
                hex::encode_prefixed(actual)
            ),
        }
    }
}

impl std::error::Error for Mismatch {}

/// Errors raised at the codec boundary while normalizing, aligning or encoding arguments.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("expected {expected} argument(s), got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("argument `{0}` was supplied both by position and by name")]
    DuplicateArgument(String),
    #[error("no parameter named `{0}`")]
    UnknownArgument(String),
    #[error("missing value for parameter `{0}`")]
    MissingArgument(String),
    #[error("expected {expected} component(s) for `{ty}`, got {actual}")]
    ComponentCount { ty: String, expected: usize, actual: usize },
    #[error("expected a list or a mapping for `{0}`")]
    ExpectedComposite(String),
    #[error("missing component `{name}` for `{ty}`")]
    MissingComponent { ty: String, name: String },
    #[error("value of type `{actual}` cannot be encoded as `{ty}`")]
    ValueMismatch { ty: String, actual: String },
    #[error("invalid ABI type `{ty}`: {source}")]
    InvalidType { ty: String, source: alloy_dyn_abi::Error },
    #[error(transparent)]
    Abi(#[from] alloy_dyn_abi::Error),
}

impl EncodingError {
    /// Returns `true` if the error means the arguments simply don't fit the element, as opposed
    /// to a malformed element or a failing codec.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ArgumentCount { .. }
                | Self::DuplicateArgument(_)
                | Self::UnknownArgument(_)
                | Self::MissingArgument(_)
                | Self::ComponentCount { .. }
                | Self::ExpectedComposite(_)
                | Self::MissingComponent { .. }
                | Self::ValueMismatch { .. }
        )
    }
}
