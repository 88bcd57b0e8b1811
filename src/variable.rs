// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module defines the dual-addressed handle used to refer to an
//! operation in a tape: free (positional) or bound (referential).
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
//
use crate::op::Operation;
//
/// The type used for positions and identifiers throughout a tape.
pub type IndexT = u32;
//
/// A reference-counted, interior-mutable operation cell; this is both the
/// tape's arena slot and a bound Variable's stable reference into it.
pub type OpCell = Rc<RefCell<Operation>>;
// ---------------------------------------------------------------------------
//
// Variable
/// A handle to an operation: either *free* (a bare position) or *bound*
/// (a live reference to the operation instance).
///
/// * Free :
/// carries only an `IndexT` identifier. It is logically stale after any
/// `insert`/`replace` that shifts positions at or below it — callers who
/// keep free variables around must rebind them explicitly.
///
/// * Bound :
/// carries a clone of the [OpCell] the tape stores at that operation's
/// position. Reading `id` walks through to the referent's own `id` field,
/// so a bound Variable transparently tracks renumbering.
#[derive(Clone)]
pub enum Variable {
    Free(IndexT),
    Bound(OpCell),
}
impl Variable {
    //
    // id
    /// Read the current identifier; dispatches on free/bound per §3.
    pub fn id(&self) -> IndexT {
        match self {
            Variable::Free(id)  => *id,
            Variable::Bound(op) => op.borrow().id,
        }
    }
    //
    // set_id
    /// Write the identifier: if bound, mutates the referent's `id`;
    /// if free, mutates the stored identifier.
    pub fn set_id(&mut self, id : IndexT) {
        match self {
            Variable::Free(slot)  => *slot = id,
            Variable::Bound(op)   => op.borrow_mut().id = id,
        }
    }
    //
    // is_bound
    pub fn is_bound(&self) -> bool {
        matches!(self, Variable::Bound(_))
    }
    //
    // as_cell
    /// The referent cell, if bound.
    pub fn as_cell(&self) -> Option<&OpCell> {
        match self {
            Variable::Bound(op) => Some(op),
            Variable::Free(_)   => None,
        }
    }
}
impl PartialEq for Variable {
    //
    // eq
    /// Two variables are equal iff both bound to the same operation
    /// instance, or both free with equal identifiers. A bound and a free
    /// variable with the same numeric identifier are never equal.
    fn eq(&self, other : &Self) -> bool {
        match (self, other) {
            (Variable::Bound(a), Variable::Bound(b)) => Rc::ptr_eq(a, b),
            (Variable::Free(a),  Variable::Free(b))  => a == b,
            _                                        => false,
        }
    }
}
impl Eq for Variable {}
impl Hash for Variable {
    fn hash<H : Hasher>(&self, state : &mut H) {
        match self {
            Variable::Free(id) => {
                0u8.hash(state);
                id.hash(state);
            }
            Variable::Bound(op) => {
                1u8.hash(state);
                (Rc::as_ptr(op) as usize).hash(state);
            }
        }
    }
}
impl fmt::Debug for Variable {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "%{}", self.id())
    }
}
impl fmt::Display for Variable {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "%{}", self.id())
    }
}
