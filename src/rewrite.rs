// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module implements the rewrite algebra: `push`, `insert`, `replace`,
//! `rebind`. These four operations are the only way §4 allows a tape's
//! shape to change after recording; everything else (renumbering on
//! insert, downstream rebinding on replace) follows from them.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use std::ops::Range;
//
use rustc_hash::FxHashMap;
//
use crate::op::{Arg, Fun, OpKind, Operation};
use crate::tape::{new_cell, Tape};
use crate::variable::{IndexT, OpCell, Variable};
// ---------------------------------------------------------------------------
//
// push
/// Append `op` at the end of the tape, assigning it the next id. Returns
/// the bound Variable for the new operation (§4.1).
pub fn push<C>(tape : &mut Tape<C>, op : Operation) -> Variable {
    insert(tape, tape.len() as IndexT + 1, vec![op])
        .pop()
        .expect("push: insert of a single operation must return one Variable")
}
// ---------------------------------------------------------------------------
//
// insert
/// Splice `ops` in before position `idx` (1-based; `idx == length(tape) +
/// 1` appends). Every existing operation at or after `idx` is renumbered
/// upward by `ops.len()` — since a bound Variable reads its id by walking
/// through to the referent, this renumbering is invisible to every bound
/// Variable already held by a caller; only [Variable::Free] handles held
/// across the call go stale (§4.1).
pub fn insert<C>(tape : &mut Tape<C>, idx : IndexT, ops : Vec<Operation>) -> Vec<Variable> {
    assert!(
        idx >= 1 && idx <= tape.len() as IndexT + 1,
        "insert: idx {} is out of range (tape has {} operations)",
        idx, tape.len(),
    );
    let insert_pos = (idx - 1) as usize;
    let shift = ops.len() as IndexT;
    for cell in &tape.ops[insert_pos..] {
        cell.borrow_mut().id += shift;
    }
    let mut vars  = Vec::with_capacity(ops.len());
    let mut cells = Vec::with_capacity(ops.len());
    for (i, mut op) in ops.into_iter().enumerate() {
        op.id = idx + i as IndexT;
        let cell = new_cell(op);
        vars.push(Variable::Bound(cell.clone()));
        cells.push(cell);
    }
    tape.ops.splice(insert_pos..insert_pos, cells);
    vars
}
// ---------------------------------------------------------------------------
//
// replace
/// Replace the operation at `idx` with `ops` (non-empty): the first
/// element overwrites position `idx` in place (so any bound Variable
/// already pointing at that position sees the new content without being
/// rebound); the remainder is inserted immediately after. Every reference
/// elsewhere in the tape — and the tape's own `result`, if set — that
/// still pointed at `idx` is then rebound to `ops[rebind_to]` (§4.1).
///
/// Returns the Variables for the replacement block, in order — so the
/// caller can read back `result[rebind_to]` if needed.
pub fn replace<C : RebindContext>(
    tape       : &mut Tape<C>,
    idx        : IndexT,
    mut ops    : Vec<Operation>,
    rebind_to  : usize,
) -> Vec<Variable> {
    assert!(!ops.is_empty(), "replace: ops must be non-empty");
    assert!(
        rebind_to < ops.len(),
        "replace: rebind_to {} is out of range for {} replacement ops",
        rebind_to, ops.len(),
    );
    let pos = idx.checked_sub(1).unwrap_or_else(|| panic!(
        "replace: idx {} is not a valid 1-based position", idx
    )) as usize;
    let old_cell = tape.ops.get(pos).unwrap_or_else(|| panic!(
        "replace: idx {} is out of range (tape has {} operations)", idx, tape.len()
    )).clone();
    let rest = ops.split_off(1);
    let first = ops.pop().unwrap();
    *old_cell.borrow_mut() = Operation { id : idx, val : first.val, kind : first.kind };

    let tail_vars = insert(tape, idx + 1, rest);
    let mut result_vars = Vec::with_capacity(1 + tail_vars.len());
    result_vars.push(Variable::Bound(old_cell));
    result_vars.extend(tail_vars);

    let target_cell = result_vars[rebind_to]
        .as_cell()
        .expect("replace: insert always returns bound Variables")
        .clone();
    let mut substitutions = FxHashMap::default();
    substitutions.insert(idx, target_cell);
    let after = idx + result_vars.len() as IndexT;
    rebind(tape, &substitutions, after..(tape.len() as IndexT + 1));

    result_vars
}
// ---------------------------------------------------------------------------
//
// rebind
/// Within `range` (1-based, half-open, over positions as they stand when
/// this call is made), rewrite every `Arg::Var`, `Fun::Dynamic`, and
/// `Loop::parent_inputs` entry — and `tape.result` — whose current id
/// matches a key of `substitutions` to instead be bound to that key's
/// cell. This is the mechanism `replace` uses to retarget downstream
/// references; it is also useful on its own when a transform pass splices
/// in an equivalent operation and wants callers to pick it up without
/// walking the tape themselves (§4.1).
///
/// A Loop's `parent_inputs`, `condition`, `cont_vars`, and `exit_vars` are
/// all checked the same way; calling `rebind` directly on a subtape (to
/// retarget references inside a loop body) only ever matches the latter
/// three, since `parent_inputs` lives in the enclosing tape's id space.
/// `rebind` never descends into `LoopOp::subtape` on its own — a pass
/// that needs to rebind inside a loop body calls `rebind` again on the
/// subtape explicitly. Finally, `context.rebind_context` is invoked so a
/// user-defined context type can rebind any Variables of its own.
pub fn rebind<C : RebindContext>(
    tape          : &mut Tape<C>,
    substitutions : &FxHashMap<IndexT, OpCell>,
    range         : Range<IndexT>,
) {
    for (i, cell) in tape.ops.iter().enumerate() {
        let id = i as IndexT + 1;
        if !range.contains(&id) { continue; }
        let mut op = cell.borrow_mut();
        rebind_in_kind(&mut op.kind, substitutions);
    }
    if let Some(result) = &mut tape.result {
        rebind_var(result, substitutions);
    }
    tape.context.rebind_context(substitutions);
}
//
// rebind_var
fn rebind_var(v : &mut Variable, substitutions : &FxHashMap<IndexT, OpCell>) {
    if let Some(cell) = substitutions.get(&v.id()) {
        *v = Variable::Bound(cell.clone());
    }
}
//
// rebind_in_kind
fn rebind_in_kind(kind : &mut OpKind, substitutions : &FxHashMap<IndexT, OpCell>) {
    match kind {
        OpKind::Call(call) => {
            if let Fun::Dynamic(v) = &mut call.fun {
                rebind_var(v, substitutions);
            }
            for arg in &mut call.args {
                if let Arg::Var(v) = arg {
                    rebind_var(v, substitutions);
                }
            }
        }
        OpKind::Loop(loop_op) => {
            for v in &mut loop_op.parent_inputs {
                rebind_var(v, substitutions);
            }
            rebind_var(&mut loop_op.condition, substitutions);
            for v in &mut loop_op.cont_vars {
                rebind_var(v, substitutions);
            }
            for v in &mut loop_op.exit_vars {
                rebind_var(v, substitutions);
            }
        }
        OpKind::Input | OpKind::Constant(_) => {}
    }
}
// ---------------------------------------------------------------------------
//
// RebindContext
/// Hook so a user-defined `context` type can rebind any Variables it
/// holds when [rebind] runs over the tape carrying it (§4.4's closing
/// paragraph). The default, used by the unit context `()`, is a no-op.
pub trait RebindContext {
    fn rebind_context(&mut self, substitutions : &FxHashMap<IndexT, OpCell>);
}
impl RebindContext for () {
    fn rebind_context(&mut self, _substitutions : &FxHashMap<IndexT, OpCell>) {}
}
