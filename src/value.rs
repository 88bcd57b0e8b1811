// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module defines the dynamically-typed value every operation carries.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use std::fmt;
use std::rc::Rc;
// ---------------------------------------------------------------------------
//
// ValueKind
/// The `typeof` of a [Value]; this is what `typ` means in the spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Missing,
    Bool,
    Int,
    Float,
    Tuple,
    Function,
}
impl fmt::Display for ValueKind {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ValueKind::Missing  => "missing",
            ValueKind::Bool     => "bool",
            ValueKind::Int      => "int",
            ValueKind::Float    => "float",
            ValueKind::Tuple    => "tuple",
            ValueKind::Function => "function",
        };
        write!(f, "{}", name)
    }
}
// ---------------------------------------------------------------------------
//
// Value
/// The value every [crate::op::Operation] caches.
///
/// This is the Rust embodiment of the traced language's `Any`: a single
/// enum wide enough that a `Call`'s `fn` (see [crate::op::call::Fun]) can
/// itself be the *value* produced by an earlier operation.
///
/// `Value::Missing` is the *missing* sentinel of the spec; it is never
/// equal to any value a traced program can legitimately produce, including
/// an explicit empty tuple.
#[derive(Clone)]
pub enum Value {
    /// not yet computed
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Tuple(Vec<Value>),
    /// a callable value; lets `fn` in a Call be produced by an earlier op
    Function(Rc<dyn Fn(&[Value]) -> Value>),
}
impl Value {
    //
    // kind
    /// Returns the [ValueKind] of this value; this is `typeof(val)`.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Missing     => ValueKind::Missing,
            Value::Bool(_)     => ValueKind::Bool,
            Value::Int(_)      => ValueKind::Int,
            Value::Float(_)    => ValueKind::Float,
            Value::Tuple(_)    => ValueKind::Tuple,
            Value::Function(_) => ValueKind::Function,
        }
    }
    //
    // is_missing
    /// true if this is the *missing* sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
    //
    // as_bool
    /// Extract a bool, panicking with a descriptive message if this value
    /// is not a bool. Used by the Loop executor to read `condition`.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => panic!(
                "Value::as_bool: value has kind {} not bool", other.kind()
            ),
        }
    }
    //
    // as_float
    /// Extract an f64, panicking with a descriptive message otherwise.
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(x) => *x,
            Value::Int(i)   => *i as f64,
            other => panic!(
                "Value::as_float: value has kind {} not float", other.kind()
            ),
        }
    }
    //
    // as_function
    /// Extract the callable, panicking with a descriptive message
    /// otherwise. Used when a Call's `fn` is itself a Variable.
    pub fn as_function(&self) -> Rc<dyn Fn(&[Value]) -> Value> {
        match self {
            Value::Function(f) => f.clone(),
            other => panic!(
                "Value::as_function: value has kind {} not function",
                other.kind()
            ),
        }
    }
}
impl fmt::Debug for Value {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Missing     => write!(f, "missing"),
            Value::Bool(b)     => write!(f, "{}", b),
            Value::Int(i)      => write!(f, "{}", i),
            Value::Float(x)    => write!(f, "{}", x),
            Value::Tuple(v)    => write!(f, "{:?}", v),
            Value::Function(_) => write!(f, "Broadcasted{{}}"),
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
impl From<bool> for Value {
    fn from(b : bool) -> Self { Value::Bool(b) }
}
impl From<i64> for Value {
    fn from(i : i64) -> Self { Value::Int(i) }
}
impl From<f64> for Value {
    fn from(x : f64) -> Self { Value::Float(x) }
}
impl From<Vec<Value>> for Value {
    fn from(v : Vec<Value>) -> Self { Value::Tuple(v) }
}
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_never_a_value_the_user_builds() {
        let nothing = Value::Tuple(vec![]);
        assert!(!nothing.is_missing());
        assert!(Value::Missing.is_missing());
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from(3i64).kind(), ValueKind::Int);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Missing.kind(), ValueKind::Missing);
    }
}
