// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module defines the operations (the IR nodes) recorded on a tape.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
pub mod call;
pub mod loop_op;
//
use std::fmt;
//
use crate::value::{Value, ValueKind};
use crate::variable::IndexT;
pub use call::{mkcall, Arg, CallOp, Fun, NamedFn};
pub use loop_op::LoopOp;
// ---------------------------------------------------------------------------
//
// OpKind
/// The four IR node variants; see §3 "Operation".
pub enum OpKind {
    /// a formal parameter of the traced program
    Input,
    /// a compile-time-known value of recorded type `typ`
    Constant(ValueKind),
    /// a function application
    Call(CallOp),
    /// a structured loop with a nested subtape
    Loop(LoopOp),
}
// ---------------------------------------------------------------------------
//
// Operation
/// One node in a [crate::tape::Tape]: a mutable `id`, a cached `val`, and
/// a tagged [OpKind]. Position in the tape's `ops` vector equals `id`
/// (1-based) once the operation has been inserted; `id` is `0` before
/// insertion (§3 "Operation").
pub struct Operation {
    pub id   : IndexT,
    pub val  : Value,
    pub kind : OpKind,
}
impl Operation {
    //
    // typ
    /// `typeof(val)`; for Constant this is the type pinned at recording
    /// time rather than re-derived from the (possibly still-missing) val.
    pub fn typ(&self) -> ValueKind {
        match &self.kind {
            OpKind::Constant(typ) => *typ,
            _                     => self.val.kind(),
        }
    }
    //
    // new_input
    pub fn new_input(val : Value) -> Self {
        Operation { id : 0, val, kind : OpKind::Input }
    }
    //
    // new_constant
    pub fn new_constant(val : Value) -> Self {
        let typ = val.kind();
        Operation { id : 0, val, kind : OpKind::Constant(typ) }
    }
}
impl fmt::Display for Operation {
    //
    // fmt
    /// The fixed display form of §6: `inp %id::type`, `const %id =
    /// val::type`, `%id = fn(args)::typ`, `%id = Loop(parent_inputs)`.
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            OpKind::Input => write!(
                f, "inp %{}::{}", self.id, self.typ()
            ),
            OpKind::Constant(typ) => write!(
                f, "const %{} = {:?}::{}", self.id, self.val, typ
            ),
            OpKind::Call(call) => {
                write!(f, "%{} = {}(", self.id, call.fun)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")::{}", self.typ())
            }
            OpKind::Loop(loop_op) => {
                write!(f, "%{} = Loop(", self.id)?;
                for (i, v) in loop_op.parent_inputs.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    }
}
