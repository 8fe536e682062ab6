//! Human readable reports of failed resolutions.

use crate::{ArgValue, NamedArgs};
use std::{collections::BTreeMap, fmt};

/// Why resolution did not produce exactly one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    /// No element with the given name takes this many arguments.
    ArgumentCount,
    /// Elements with a matching argument count exist, but none accepts the argument types.
    ArgumentTypes,
    /// The arguments can be encoded for more than one element.
    Ambiguous,
}

impl MismatchReason {
    /// Picks the reason from the number of arity and encoding matches.
    ///
    /// Returns `None` when exactly one candidate is encodable, i.e. there's nothing to diagnose.
    pub fn from_counts(arity_matches: usize, encoding_matches: usize) -> Option<Self> {
        if arity_matches == 0 {
            Some(Self::ArgumentCount)
        } else if encoding_matches == 0 {
            Some(Self::ArgumentTypes)
        } else if encoding_matches > 1 {
            Some(Self::Ambiguous)
        } else {
            None
        }
    }
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ArgumentCount => "Function invocation failed due to improper number of arguments.",
            Self::ArgumentTypes => "Function invocation failed due to no matching argument types.",
            Self::Ambiguous => {
                "Ambiguous argument encoding. Provided arguments can be encoded to multiple \
                 functions matching this call."
            }
        })
    }
}

/// A human readable account of a failed resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnosis {
    pub identifier: String,
    pub reason: MismatchReason,
    /// Rendered types of the positional arguments.
    pub positional_types: String,
    /// Rendered type of each named argument.
    pub named_types: BTreeMap<String, String>,
    /// Signatures of every element with the given name, regardless of argument count.
    pub signatures: Vec<String>,
}

impl Diagnosis {
    pub fn new(
        identifier: impl Into<String>,
        reason: MismatchReason,
        args: &[ArgValue],
        named: &NamedArgs,
        signatures: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            reason,
            positional_types: render_argument_types(args),
            named_types: named
                .iter()
                .map(|(name, value)| {
                    (name.clone(), render_argument_types(std::slice::from_ref(value)))
                })
                .collect(),
            signatures,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { identifier, reason, positional_types, named_types, signatures } = self;
        write!(
            f,
            "Could not identify the intended function with name `{identifier}`, positional \
             arguments with type(s) `({positional_types})` and keyword arguments with type(s) `{{"
        )?;
        for (i, (name, ty)) in named_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {ty}")?;
        }
        writeln!(f, "}}`.")?;
        writeln!(
            f,
            "Found {} function(s) with the name `{identifier}`: [{}]",
            signatures.len(),
            signatures.join(", ")
        )?;
        fmt::Display::fmt(reason, f)
    }
}

/// Renders the readable types of a list of arguments.
///
/// Top level lists are flattened into their element types, lists nested within them are wrapped
/// in parentheses, e.g. `int,(string,address)`.
pub fn render_argument_types(args: &[ArgValue]) -> String {
    let mut rendered = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            ArgValue::List(items) => {
                let nested = items
                    .iter()
                    .map(|item| match item {
                        ArgValue::List(inner) => format!("({})", render_argument_types(inner)),
                        item => item.readable_type().to_string(),
                    })
                    .collect::<Vec<_>>();
                rendered.push(nested.join(","));
            }
            arg => rendered.push(arg.readable_type().to_string()),
        }
    }
    rendered.join(",")
}
