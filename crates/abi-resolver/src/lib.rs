//! # foundry-abi-resolver
//!
//! Resolves a function, event or error identifier plus call arguments against a contract ABI.
//!
//! Overloaded elements are disambiguated by argument count first and then by whether the
//! supplied arguments can be encoded at each candidate's declared parameter types. The resolved
//! element comes back with its selector and its arguments normalized into declared order, ready
//! for encoding. Event logs can be checked against an event's signature topic with
//! [`strip_signature_topic`].
//!
//! The binary codec is consumed through the [`Codec`] trait; [`DynAbiCodec`] is the default
//! implementation backed by `alloy-dyn-abi`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod codec;
pub use codec::{Codec, DynAbiCodec};

mod config;
pub use config::CodecConfig;

mod diagnosis;
pub use diagnosis::{Diagnosis, MismatchReason, render_argument_types};

mod element;
pub use element::{AbiElement, ElementKind, Identifier, InputParam, Interface};

mod error;
pub use error::{EncodingError, Mismatch, ResolveError};

mod filter;
pub use filter::{DataFilter, normalize_data_value};

pub mod inputs;

mod resolve;
pub use resolve::{ResolvedElement, can_encode, find_element, find_event, resolve};

mod topics;
pub use topics::{LogTopic, strip_signature_topic};

mod value;
pub use value::{ArgValue, NamedArgs};
