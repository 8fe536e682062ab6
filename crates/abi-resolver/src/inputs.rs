//! Argument normalization and alignment against declared inputs.
//!
//! These are the default implementations behind [`Codec::normalize_inputs`] and
//! [`Codec::align_inputs`].
//!
//! [`Codec::normalize_inputs`]: crate::Codec::normalize_inputs
//! [`Codec::align_inputs`]: crate::Codec::align_inputs

use crate::{AbiElement, ArgValue, EncodingError, InputParam, NamedArgs};
use alloy_dyn_abi::DynSolType;

/// Orders positional and named arguments into the element's declared parameter order.
///
/// Named arguments fill their slots first, positional arguments then fill the remaining slots
/// left to right.
pub fn normalize_inputs(
    element: &AbiElement,
    args: &[ArgValue],
    named: &NamedArgs,
) -> Result<Vec<ArgValue>, EncodingError> {
    let inputs = element.inputs();
    let supplied = args.len() + named.len();
    if supplied != inputs.len() {
        return Err(EncodingError::ArgumentCount { expected: inputs.len(), actual: supplied });
    }

    let mut slots: Vec<Option<ArgValue>> = vec![None; inputs.len()];
    for (name, value) in named {
        let index = inputs
            .iter()
            .position(|input| input.name == name.as_str())
            .ok_or_else(|| EncodingError::UnknownArgument(name.clone()))?;
        // the named slot is also covered by a positional argument
        if index < args.len() {
            return Err(EncodingError::DuplicateArgument(name.clone()));
        }
        slots[index] = Some(value.clone());
    }

    let mut positional = args.iter();
    for slot in &mut slots {
        if slot.is_none() {
            *slot = positional.next().cloned();
        }
    }

    std::iter::zip(&inputs, slots)
        .map(|(input, slot)| slot.ok_or_else(|| EncodingError::MissingArgument(input.name.into())))
        .collect()
}

/// Reshapes normalized arguments to the declared, possibly nested, tuple structure.
///
/// Returns the canonical type of every input alongside the aligned values.
pub fn align_inputs(
    element: &AbiElement,
    args: Vec<ArgValue>,
) -> Result<(Vec<String>, Vec<ArgValue>), EncodingError> {
    let inputs = element.inputs();
    if inputs.len() != args.len() {
        return Err(EncodingError::ArgumentCount { expected: inputs.len(), actual: args.len() });
    }

    let mut types = Vec::with_capacity(inputs.len());
    let mut aligned = Vec::with_capacity(inputs.len());
    for (input, arg) in std::iter::zip(&inputs, args) {
        let ty = input.canonical_type();
        DynSolType::parse(&ty)
            .map_err(|source| EncodingError::InvalidType { ty: ty.clone(), source })?;
        aligned.push(align_value(input, arg)?);
        types.push(ty);
    }
    Ok((types, aligned))
}

fn align_value(input: &InputParam<'_>, value: ArgValue) -> Result<ArgValue, EncodingError> {
    let Some(suffix) = input.ty.strip_prefix("tuple") else {
        return Ok(value);
    };
    align_tuple(input, suffix, value)
}

/// Aligns a tuple value, or an array of tuples for each remaining `[..]` in `suffix`.
fn align_tuple(
    input: &InputParam<'_>,
    suffix: &str,
    value: ArgValue,
) -> Result<ArgValue, EncodingError> {
    if let Some(inner) = strip_last_array(suffix) {
        let ArgValue::List(items) = value else {
            return Err(EncodingError::ExpectedComposite(input.canonical_type()));
        };
        return items
            .into_iter()
            .map(|item| align_tuple(input, inner, item))
            .collect::<Result<Vec<_>, _>>()
            .map(ArgValue::List);
    }

    let components = input.components;
    let values = match value {
        ArgValue::List(values) => {
            if values.len() != components.len() {
                return Err(EncodingError::ComponentCount {
                    ty: input.canonical_type(),
                    expected: components.len(),
                    actual: values.len(),
                });
            }
            values
        }
        ArgValue::Map(mut values) => {
            let mut ordered = Vec::with_capacity(components.len());
            for component in components {
                let value = values.remove(&component.name).ok_or_else(|| {
                    EncodingError::MissingComponent {
                        ty: input.canonical_type(),
                        name: component.name.clone(),
                    }
                })?;
                ordered.push(value);
            }
            if let Some(extra) = values.into_keys().next() {
                return Err(EncodingError::UnknownArgument(extra));
            }
            ordered
        }
        _ => return Err(EncodingError::ExpectedComposite(input.canonical_type())),
    };

    std::iter::zip(components, values)
        .map(|(component, value)| align_value(&InputParam::from_param(component), value))
        .collect::<Result<Vec<_>, _>>()
        .map(ArgValue::List)
}

/// Strips the outermost array dimension, e.g. `[2][]` -> `[2]`.
fn strip_last_array(suffix: &str) -> Option<&str> {
    if !suffix.ends_with(']') {
        return None;
    }
    suffix.rfind('[').map(|start| &suffix[..start])
}
