use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use crate::{ast::AstNode, compiler::evaluator::env::Environment};

/// A user-defined function value.
///
/// Captures the parameter names, the body block, and the environment the
/// function was declared in. Calls bind arguments in a child of that
/// captured environment, so names from the declaration site stay visible.
#[derive(Clone)]
pub struct FunctionValue {
    /// The name the function was declared under.
    pub name:   String,
    /// Positional parameter names.
    pub params: Vec<String>,
    /// The functional block executed on every call.
    pub body:   AstNode,
    /// The environment captured at declaration time.
    pub env:    Environment,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may transitively contain this function;
        // printing it would recurse forever.
        f.debug_struct("FunctionValue")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

/// Represents a runtime value produced by the constant evaluator.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed number, from number literals.
    Number(i64),
    /// A double-precision real, from real literals.
    Real(f64),
    /// A 64-bit unsigned number, from `u`-suffixed literals.
    Unsigned(u64),
    /// A single octet, from `c`-suffixed literals.
    Octet(u8),
    /// A single bit, from `b`-suffixed literals and comparisons.
    Bit(bool),
    /// A string, from string literals.
    Str(String),
    /// The none value.
    None,
    /// A function; shared so calls and bindings alias one definition.
    Function(Rc<FunctionValue>),
    /// An object: a shared member table. Multiple handles observe the same
    /// instance.
    Object(Rc<RefCell<BTreeMap<String, Value>>>),
}

impl Value {
    /// A short name for the value's type, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Real(_) => "real",
            Self::Unsigned(_) => "unsigned",
            Self::Octet(_) => "octet",
            Self::Bit(_) => "bit",
            Self::Str(_) => "string",
            Self::None => "none",
            Self::Function(_) => "function",
            Self::Object(_) => "object",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Octet(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bit(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Structural equality for scalar variants; identity for functions and
/// objects.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Unsigned(a), Self::Unsigned(b)) => a == b,
            (Self::Octet(a), Self::Octet(b)) => a == b,
            (Self::Bit(a), Self::Bit(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::None, Self::None) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Octet(v) => write!(f, "{v}"),
            Self::Bit(v) => write!(f, "{}", u8::from(*v)),
            Self::Str(v) => write!(f, "{v}"),
            Self::None => write!(f, "none"),
            Self::Function(v) => write!(f, "<func {}>", v.name),
            Self::Object(members) => {
                write!(f, "{{")?;
                for (index, (name, value)) in members.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name} = {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}
