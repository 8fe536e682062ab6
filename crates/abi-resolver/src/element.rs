//! ABI elements and the interface they make up.

use alloy_json_abi::{Constructor, Error, Event, Fallback, Function, JsonAbi, Param, Receive};
use std::fmt;

/// A single entry of a contract ABI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiElement {
    Function(Function),
    Constructor(Constructor),
    Fallback(Fallback),
    Receive(Receive),
    Event(Event),
    Error(Error),
}

/// The kind of an [`AbiElement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Function,
    Constructor,
    Fallback,
    Receive,
    Event,
    Error,
}

impl ElementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Constructor => "constructor",
            Self::Fallback => "fallback",
            Self::Receive => "receive",
            Self::Event => "event",
            Self::Error => "error",
        }
    }

    /// Whether elements of this kind are looked up by name.
    pub const fn is_named(self) -> bool {
        matches!(self, Self::Function | Self::Event | Self::Error)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of a declared input, uniform over function and event parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputParam<'a> {
    pub name: &'a str,
    pub ty: &'a str,
    pub components: &'a [Param],
}

impl<'a> InputParam<'a> {
    pub fn from_param(param: &'a Param) -> Self {
        Self { name: &param.name, ty: &param.ty, components: &param.components }
    }

    /// Whether this is a tuple, or an array of tuples.
    pub fn is_tuple(&self) -> bool {
        self.ty.starts_with("tuple")
    }

    /// The canonical type with tuples collapsed into their component types, e.g.
    /// `(uint256,address)[]` for `tuple[]`.
    pub fn canonical_type(&self) -> String {
        let mut out = String::new();
        collapse_type(self.ty, self.components, &mut out);
        out
    }
}

fn collapse_type(ty: &str, components: &[Param], out: &mut String) {
    let Some(suffix) = ty.strip_prefix("tuple") else {
        out.push_str(ty);
        return;
    };
    out.push('(');
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        collapse_type(&component.ty, &component.components, out);
    }
    out.push(')');
    out.push_str(suffix);
}

impl AbiElement {
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Function(_) => ElementKind::Function,
            Self::Constructor(_) => ElementKind::Constructor,
            Self::Fallback(_) => ElementKind::Fallback,
            Self::Receive(_) => ElementKind::Receive,
            Self::Event(_) => ElementKind::Event,
            Self::Error(_) => ElementKind::Error,
        }
    }

    /// Returns the element's name. Constructors, fallback and receive functions are unnamed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(f) => Some(&f.name),
            Self::Event(e) => Some(&e.name),
            Self::Error(e) => Some(&e.name),
            Self::Constructor(_) | Self::Fallback(_) | Self::Receive(_) => None,
        }
    }

    /// Returns the declared inputs in order.
    pub fn inputs(&self) -> Vec<InputParam<'_>> {
        match self {
            Self::Function(f) => f.inputs.iter().map(InputParam::from_param).collect(),
            Self::Constructor(c) => c.inputs.iter().map(InputParam::from_param).collect(),
            Self::Error(e) => e.inputs.iter().map(InputParam::from_param).collect(),
            Self::Event(e) => e
                .inputs
                .iter()
                .map(|p| InputParam { name: &p.name, ty: &p.ty, components: &p.components })
                .collect(),
            Self::Fallback(_) | Self::Receive(_) => Vec::new(),
        }
    }

    pub fn input_count(&self) -> usize {
        match self {
            Self::Function(f) => f.inputs.len(),
            Self::Constructor(c) => c.inputs.len(),
            Self::Error(e) => e.inputs.len(),
            Self::Event(e) => e.inputs.len(),
            Self::Fallback(_) | Self::Receive(_) => 0,
        }
    }

    /// Returns the canonical signature, e.g. `transfer(address,uint256)`.
    ///
    /// Unnamed elements use their kind as the name.
    pub fn signature(&self) -> String {
        let name = self.name().unwrap_or(self.kind().as_str());
        let types = self.inputs().iter().map(InputParam::canonical_type).collect::<Vec<_>>();
        format!("{name}({})", types.join(","))
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for AbiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.signature())
    }
}

impl From<Function> for AbiElement {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Constructor> for AbiElement {
    fn from(c: Constructor) -> Self {
        Self::Constructor(c)
    }
}

impl From<Fallback> for AbiElement {
    fn from(f: Fallback) -> Self {
        Self::Fallback(f)
    }
}

impl From<Receive> for AbiElement {
    fn from(r: Receive) -> Self {
        Self::Receive(r)
    }
}

impl From<Event> for AbiElement {
    fn from(e: Event) -> Self {
        Self::Event(e)
    }
}

impl From<Error> for AbiElement {
    fn from(e: Error) -> Self {
        Self::Error(e)
    }
}

/// An ordered, immutable collection of ABI elements describing a contract's interface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interface {
    elements: Vec<AbiElement>,
}

impl Interface {
    pub fn new(elements: Vec<AbiElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[AbiElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AbiElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns all elements of the given kind, in declaration order.
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &AbiElement> {
        self.elements.iter().filter(move |element| element.kind() == kind)
    }

    /// Returns all functions, events and errors with exactly the given name.
    pub fn named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a AbiElement> + use<'a, 'n> {
        self.elements
            .iter()
            .filter(move |element| element.kind().is_named() && element.name() == Some(name))
    }
}

impl From<Vec<AbiElement>> for Interface {
    fn from(elements: Vec<AbiElement>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<AbiElement> for Interface {
    fn from_iter<I: IntoIterator<Item = AbiElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<&JsonAbi> for Interface {
    fn from(abi: &JsonAbi) -> Self {
        let mut elements = Vec::new();
        elements.extend(abi.constructor.clone().map(AbiElement::Constructor));
        elements.extend(abi.fallback.map(AbiElement::Fallback));
        elements.extend(abi.receive.map(AbiElement::Receive));
        elements.extend(abi.functions.values().flatten().cloned().map(AbiElement::Function));
        elements.extend(abi.events.values().flatten().cloned().map(AbiElement::Event));
        elements.extend(abi.errors.values().flatten().cloned().map(AbiElement::Error));
        Self::new(elements)
    }
}

impl From<JsonAbi> for Interface {
    fn from(abi: JsonAbi) -> Self {
        Self::from(&abi)
    }
}

impl<'a> IntoIterator for &'a Interface {
    type Item = &'a AbiElement;
    type IntoIter = std::slice::Iter<'a, AbiElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Identifies the element to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identifier<'a> {
    /// A function, event or error name, or `constructor`.
    Name(&'a str),
    /// The fallback function.
    Fallback,
    /// The receive function.
    Receive,
}

impl<'a> From<&'a str> for Identifier<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Identifier<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Fallback => f.write_str("fallback"),
            Self::Receive => f.write_str("receive"),
        }
    }
}
