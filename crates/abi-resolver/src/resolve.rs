//! Overload resolution of ABI elements.

use crate::{
    AbiElement, ArgValue, Codec, Diagnosis, ElementKind, EncodingError, Identifier, Interface,
    Mismatch, MismatchReason, NamedArgs, ResolveError,
};
use alloy_json_abi::Event;
use alloy_primitives::{Bytes, Selector};

/// An element resolved from an identifier and call arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedElement<'a> {
    /// The matching ABI element.
    pub element: &'a AbiElement,
    /// The element's selector. `None` for constructors, fallback and receive functions.
    pub selector: Option<Selector>,
    /// Canonical types of the element's inputs.
    pub types: Vec<String>,
    /// The call arguments in declared order, aligned to the declared tuple structure.
    pub arguments: Vec<ArgValue>,
}

impl ResolvedElement<'_> {
    /// ABI-encodes the arguments, prefixed with the selector if there is one.
    pub fn encode_input<C: Codec + ?Sized>(&self, codec: &C) -> Result<Bytes, EncodingError> {
        let params = codec.encode(&self.types, &self.arguments)?;
        let mut data = Vec::with_capacity(4 + params.len());
        if let Some(selector) = self.selector {
            data.extend_from_slice(selector.as_slice());
        }
        data.extend_from_slice(&params);
        Ok(data.into())
    }
}

/// Resolves `identifier` and the call arguments to a single element, its selector and its
/// normalized arguments.
///
/// See [`find_element`] for how the element is chosen.
pub fn resolve<'a, 'i, C: Codec + ?Sized>(
    interface: &'a Interface,
    identifier: impl Into<Identifier<'i>>,
    args: &[ArgValue],
    named: &NamedArgs,
    codec: &C,
) -> Result<ResolvedElement<'a>, ResolveError> {
    let element = find_element(interface, identifier, args, named, codec)?;
    let selector = codec.selector(element);

    if matches!(element, AbiElement::Fallback(_) | AbiElement::Receive(_)) {
        return Ok(ResolvedElement { element, selector, types: Vec::new(), arguments: Vec::new() });
    }

    let normalized = codec.normalize_inputs(element, args, named)?;
    let (types, arguments) = codec.align_inputs(element, normalized)?;
    Ok(ResolvedElement { element, selector, types, arguments })
}

/// Finds the single element matching `identifier` and the call arguments.
///
/// Fallback, receive and the constructor are looked up by their dedicated identifiers and must
/// occur exactly once. Any other name is matched against functions, events and errors: first by
/// name, then by argument count, then by whether every argument is encodable at the candidate's
/// declared type. Exactly one candidate must remain.
pub fn find_element<'a, 'i, C: Codec + ?Sized>(
    interface: &'a Interface,
    identifier: impl Into<Identifier<'i>>,
    args: &[ArgValue],
    named: &NamedArgs,
    codec: &C,
) -> Result<&'a AbiElement, ResolveError> {
    let name = match identifier.into() {
        Identifier::Fallback | Identifier::Name("fallback") => {
            return single_of_kind(interface, ElementKind::Fallback);
        }
        Identifier::Receive | Identifier::Name("receive") => {
            return single_of_kind(interface, ElementKind::Receive);
        }
        Identifier::Name("") => return Err(ResolveError::InvalidIdentifier),
        Identifier::Name("constructor") => {
            return single_of_kind(interface, ElementKind::Constructor);
        }
        Identifier::Name(name) => name,
    };

    let by_name = interface.named(name).collect::<Vec<_>>();
    let arg_count = args.len() + named.len();
    let arity_matches = by_name
        .iter()
        .copied()
        .filter(|element| element.input_count() == arg_count)
        .collect::<Vec<_>>();
    trace!(
        name,
        arg_count,
        named = by_name.len(),
        arity = arity_matches.len(),
        "filtered candidates"
    );

    if args.is_empty() && named.is_empty() && arity_matches.len() == 1 {
        return Ok(arity_matches[0]);
    }

    let mut encoding_matches = Vec::new();
    for element in &arity_matches {
        if can_encode(element, args, named, codec)? {
            encoding_matches.push(*element);
        } else {
            debug!(signature = %element.signature(), "arguments not encodable for candidate");
        }
    }

    if let [element] = encoding_matches.as_slice() {
        debug!(%element, "resolved element");
        return Ok(*element);
    }

    let reason = MismatchReason::from_counts(arity_matches.len(), encoding_matches.len())
        .unwrap_or(MismatchReason::Ambiguous);
    let signatures = by_name.iter().map(|element| element.signature()).collect();
    let diagnosis = Diagnosis::new(name, reason, args, named, signatures);
    debug!(name, ?reason, "failed to resolve element");
    Err(Mismatch::Resolution(Box::new(diagnosis)).into())
}

fn single_of_kind(interface: &Interface, kind: ElementKind) -> Result<&AbiElement, ResolveError> {
    let mut matches = interface.of_kind(kind);
    match (matches.next(), matches.next()) {
        (Some(element), None) => Ok(element),
        (Some(_), Some(_)) => {
            debug!(%kind, "interface declares more than one");
            Err(ResolveError::NotFound(kind))
        }
        _ => Err(ResolveError::NotFound(kind)),
    }
}

/// Returns `true` if the arguments can be normalized, aligned and encoded for `element`.
///
/// Ordinary mismatches yield `Ok(false)`. Errors are only returned for structural problems, such
/// as a malformed declared type.
pub fn can_encode<C: Codec + ?Sized>(
    element: &AbiElement,
    args: &[ArgValue],
    named: &NamedArgs,
    codec: &C,
) -> Result<bool, EncodingError> {
    if matches!(element, AbiElement::Fallback(_) | AbiElement::Receive(_)) {
        return Ok(true);
    }

    let normalized = match codec.normalize_inputs(element, args, named) {
        Ok(normalized) => normalized,
        Err(err) if err.is_mismatch() => return Ok(false),
        Err(err) => return Err(err),
    };
    if normalized.len() != element.input_count() {
        return Ok(false);
    }

    let (types, aligned) = match codec.align_inputs(element, normalized) {
        Ok(aligned) => aligned,
        Err(err) if err.is_mismatch() => return Ok(false),
        Err(err) => return Err(err),
    };

    Ok(std::iter::zip(&types, &aligned).all(|(ty, value)| codec.is_encodable(ty, value)))
}

/// Finds the single event named `name`.
///
/// If `argument_names` is given, only events declaring all of those inputs are considered.
pub fn find_event<'a>(
    interface: &'a Interface,
    name: &str,
    argument_names: Option<&[&str]>,
) -> Result<&'a Event, ResolveError> {
    if name.is_empty() {
        return Err(ResolveError::MissingEventName);
    }

    let mut candidates = interface.iter().filter_map(AbiElement::as_event).filter(|event| {
        event.name == name
            && argument_names.is_none_or(|names| {
                names.iter().all(|arg| event.inputs.iter().any(|input| input.name == *arg))
            })
    });
    match (candidates.next(), candidates.next()) {
        (Some(event), None) => Ok(event),
        (Some(_), Some(_)) => Err(ResolveError::MultipleEvents(name.to_string())),
        _ => Err(ResolveError::NotFound(ElementKind::Event)),
    }
}
