//! Event log topic validation.

use crate::{Codec, Mismatch, ResolveError};
use alloy_json_abi::Event;
use alloy_primitives::{B256, Bytes, hex};
use std::borrow::Cow;

/// A log topic as received from a node or a caller, either hex encoded or raw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTopic {
    Hex(String),
    Raw(Bytes),
}

impl LogTopic {
    /// Returns the topic's bytes.
    ///
    /// Hex topics may omit the `0x` prefix and may have an odd number of digits, `0x1` decodes
    /// to `[0x01]`.
    pub fn to_bytes(&self) -> Result<Bytes, ResolveError> {
        match self {
            Self::Raw(bytes) => Ok(bytes.clone()),
            Self::Hex(s) => {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let digits = if digits.len() % 2 == 1 {
                    Cow::Owned(format!("0{digits}"))
                } else {
                    Cow::Borrowed(digits)
                };
                hex::decode(digits.as_ref())
                    .map(Into::into)
                    .map_err(|reason| ResolveError::InvalidTopic { topic: s.clone(), reason })
            }
        }
    }
}

impl From<B256> for LogTopic {
    fn from(topic: B256) -> Self {
        Self::Raw(Bytes::copy_from_slice(topic.as_slice()))
    }
}

impl From<Bytes> for LogTopic {
    fn from(topic: Bytes) -> Self {
        Self::Raw(topic)
    }
}

impl From<&str> for LogTopic {
    fn from(topic: &str) -> Self {
        Self::Hex(topic.to_string())
    }
}

impl From<String> for LogTopic {
    fn from(topic: String) -> Self {
        Self::Hex(topic)
    }
}

/// Checks that the first topic is the event's signature hash and returns the remaining,
/// indexed argument topics.
///
/// Anonymous events carry no signature topic, so all topics are returned as is. Missing topics
/// are treated as empty.
pub fn strip_signature_topic<'t, C: Codec + ?Sized>(
    event: &Event,
    topics: Option<&'t [LogTopic]>,
    codec: &C,
) -> Result<&'t [LogTopic], ResolveError> {
    let topics = topics.unwrap_or_default();
    if event.anonymous {
        return Ok(topics);
    }

    let Some((first, rest)) = topics.split_first() else {
        return Err(Mismatch::MissingTopics.into());
    };
    let expected = codec.signature_hash(event);
    let actual = first.to_bytes()?;
    if actual.as_ref() != expected.as_slice() {
        debug!(event = %event.name, %expected, ?actual, "event signature mismatch");
        return Err(Mismatch::SignatureMismatch { expected, actual }.into());
    }
    Ok(rest)
}
