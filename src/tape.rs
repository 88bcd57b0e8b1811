// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module defines the tape: an ordered, mutable container of
//! operations, together with the read-only queries of §4.3.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
//
use rustc_hash::FxHashMap;
//
use crate::op::{OpKind, Operation};
use crate::value::Value;
use crate::variable::{IndexT, OpCell, Variable};
// ---------------------------------------------------------------------------
//
/// Identifies which recording a tape belongs to; see the "Implementation
/// note on `parent`" in SPEC_FULL.md §3.
pub type TapeId = u64;
//
/// The tape_id values that have been used are `1 ..= NEXT_TAPE_ID - 1`
/// (0 means "no tape").
static NEXT_TAPE_ID : AtomicU64 = AtomicU64::new(1);
//
fn next_tape_id() -> TapeId {
    NEXT_TAPE_ID.fetch_add(1, Ordering::Relaxed)
}
// ---------------------------------------------------------------------------
//
// Tape
/// An ordered, mutable container of operations; see §3 "Tape".
///
/// * C :
/// the type of the user-supplied `context`; transform passes attach
/// structured state here. Defaults to `()` when a tape has no use for one.
pub struct Tape<C = ()> {
    pub(crate) ops : Vec<OpCell>,
    pub result     : Option<Variable>,
    pub parent     : Option<TapeId>,
    pub meta       : FxHashMap<String, Value>,
    pub context    : C,
    pub(crate) tape_id : TapeId,
    max_loop_iterations : Option<u64>,
}
impl<C : Default> Tape<C> {
    //
    // new
    /// An empty tape with a default-constructed context.
    pub fn new() -> Self {
        Tape {
            ops                 : Vec::new(),
            result              : None,
            parent              : None,
            meta                : FxHashMap::default(),
            context             : C::default(),
            tape_id             : next_tape_id(),
            max_loop_iterations : None,
        }
    }
}
impl<C> Tape<C> {
    //
    // with_context
    /// An empty tape carrying the given context.
    pub fn with_context(context : C) -> Self {
        Tape {
            ops                 : Vec::new(),
            result              : None,
            parent              : None,
            meta                : FxHashMap::default(),
            context,
            tape_id             : next_tape_id(),
            max_loop_iterations : None,
        }
    }
    //
    // tape_id
    pub fn tape_id(&self) -> TapeId { self.tape_id }
    //
    // len
    /// `length(tape)`: the number of operations.
    pub fn len(&self) -> usize { self.ops.len() }
    //
    // is_empty
    pub fn is_empty(&self) -> bool { self.ops.is_empty() }
    //
    // set_max_loop_iterations
    /// Resolves the Open Question of SPEC_FULL.md §0/§9: bound the number
    /// of passes a nested Loop's executor may make over its subtape
    /// before treating non-termination as a programmer error. `None`
    /// (the default) means unbounded.
    pub fn set_max_loop_iterations(&mut self, cap : Option<u64>) {
        self.max_loop_iterations = cap;
    }
    //
    // max_loop_iterations
    pub fn max_loop_iterations(&self) -> Option<u64> {
        self.max_loop_iterations
    }
    //
    // get
    /// `tape[v]`: the operation cell at `v`'s current position. This
    /// always resolves by position, regardless of whether `v` is free or
    /// bound — a bound Variable's own referent is only guaranteed to sit
    /// at that position by the tape consistency invariant (§3).
    pub fn get(&self, v : &Variable) -> OpCell {
        self.op_at(v.id())
    }
    //
    // op_at
    /// The operation cell at 1-based position `id`. Out-of-range `id` is
    /// a programmer error (§4.3/§7).
    pub fn op_at(&self, id : IndexT) -> OpCell {
        let idx = id.checked_sub(1).unwrap_or_else(|| panic!(
            "Tape::op_at: id {} is not a valid 1-based position", id
        )) as usize;
        self.ops.get(idx).unwrap_or_else(|| panic!(
            "Tape::op_at: id {} is out of range (tape has {} operations)",
            id, self.ops.len()
        )).clone()
    }
    //
    // iter
    /// Iterate the operation cells in tape order.
    pub fn iter(&self) -> impl Iterator<Item = &OpCell> {
        self.ops.iter()
    }
    //
    // inputs
    /// Bound Variables for each Input operation, in positional order
    /// (§4.3).
    pub fn inputs(&self) -> Vec<Variable> {
        self.ops.iter()
            .filter(|cell| matches!(cell.borrow().kind, OpKind::Input))
            .map(|cell| Variable::Bound(cell.clone()))
            .collect()
    }
    //
    // set_inputs
    /// `inputs!(tape, vals…)`: if the tape has no Input operations yet,
    /// append one per supplied value and return their Variables.
    /// Otherwise, overwrite the existing Inputs' `val` fields in place
    /// (the count must match — mismatch is fatal) and return the same
    /// Variables. See §4.3.
    pub fn set_inputs(&mut self, vals : Vec<Value>) -> Vec<Variable> {
        let existing = self.inputs();
        if existing.is_empty() {
            vals.into_iter()
                .map(|val| crate::rewrite::push(self, Operation::new_input(val)))
                .collect()
        } else {
            assert_eq!(
                existing.len(), vals.len(),
                "Tape::set_inputs: {} values given but tape already has {} inputs",
                vals.len(), existing.len(),
            );
            for (var, val) in existing.iter().zip(vals.into_iter()) {
                var.as_cell().unwrap().borrow_mut().val = val;
            }
            existing
        }
    }
}
impl<C> fmt::Display for Tape<C> {
    //
    // fmt
    /// `Tape{<C>}` followed by one indented operation per line (§6).
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Tape{{{}}}", std::any::type_name::<C>())?;
        for cell in &self.ops {
            writeln!(f, "    {}", cell.borrow())?;
        }
        Ok(())
    }
}
// ---------------------------------------------------------------------------
//
// extend from a RefCell helper used by Tape::get's callers elsewhere in the
// crate; kept private since Rc<RefCell<Operation>> is an implementation
// detail of the bound-Variable representation (§3's Implementation note).
pub(crate) fn new_cell(op : Operation) -> OpCell {
    Rc::new(RefCell::new(op))
}
