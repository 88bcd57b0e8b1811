// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! Small cross-cutting helpers that don't belong to any one component;
//! see §4.6.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use crate::op::{Arg, CallOp, Fun};
use crate::tape::Tape;
use crate::value::ValueKind;
use crate::variable::Variable;
// ---------------------------------------------------------------------------
//
// call_signature
/// `(typeof(fn_val), typeof(arg_val)…)`, resolving every Variable
/// involved — bound or free — to its current value kind. A free
/// Variable is resolved positionally against `tape`, the same way
/// [bound] and [Tape::get] do, since §3 "Variable" permits free
/// Variables as legitimate positional references into a tape. Used by
/// downstream passes for method-table lookup (§4.6).
pub fn call_signature<C>(tape : &Tape<C>, call : &CallOp) -> Vec<ValueKind> {
    let mut sig = Vec::with_capacity(1 + call.args.len());
    sig.push(fun_kind(tape, &call.fun));
    sig.extend(call.args.iter().map(|arg| arg_kind(tape, arg)));
    sig
}
//
// fun_kind
fn fun_kind<C>(tape : &Tape<C>, fun : &Fun) -> ValueKind {
    match fun {
        Fun::Native(_)     => ValueKind::Function,
        Fun::Dynamic(v)    => tape.get(v).borrow().val.kind(),
    }
}
//
// arg_kind
fn arg_kind<C>(tape : &Tape<C>, arg : &Arg) -> ValueKind {
    match arg {
        Arg::Const(v) => v.kind(),
        Arg::Var(v)   => tape.get(v).borrow().val.kind(),
    }
}
// ---------------------------------------------------------------------------
//
// bound
/// Convert `v` to its bound form by looking up the operation currently at
/// `v.id()` in `tape` (§4.6). If `v` is already bound this returns an
/// equivalent handle to the same instance.
pub fn bound<C>(tape : &Tape<C>, v : &Variable) -> Variable {
    Variable::Bound(tape.get(v))
}
