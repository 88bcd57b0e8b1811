// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module defines the structured loop operation: a nested subtape
//! with its own input-binding and exit-condition semantics.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use crate::tape::Tape;
use crate::variable::Variable;
// ---------------------------------------------------------------------------
//
// LoopOp
/// A structured loop; see §3 "Loop".
///
/// Invariant: `|parent_inputs| == |cont_vars| == |subtape.inputs()|`, and
/// `exit_vars` is a subset of `cont_vars` in order. [LoopOp::new]
/// enforces the first of these at construction time; `exit_vars ⊆
/// cont_vars` is the caller's responsibility (the core does not search
/// `cont_vars` for membership, matching §8's note that such structural
/// constraints are asserted by tests, not the engine).
pub struct LoopOp {
    /// initial values for loop-carried state, in the enclosing tape
    pub parent_inputs : Vec<Variable>,
    /// the loop body
    pub subtape       : Tape,
    /// boolean Variable inside `subtape`; `false` terminates the loop
    pub condition     : Variable,
    /// next iteration's inputs, in `subtape`
    pub cont_vars     : Vec<Variable>,
    /// the subset of `cont_vars` (in order) forming the loop's result
    pub exit_vars     : Vec<Variable>,
}
impl LoopOp {
    //
    // new
    /// Build a Loop operation, checking the one invariant the core can
    /// cheaply verify at construction time (§3's Loop invariant, first
    /// clause).
    pub fn new(
        parent_inputs : Vec<Variable>,
        subtape       : Tape,
        condition     : Variable,
        cont_vars     : Vec<Variable>,
        exit_vars     : Vec<Variable>,
    ) -> Self {
        let n_inputs = subtape.inputs().len();
        assert_eq!(
            parent_inputs.len(), cont_vars.len(),
            "LoopOp::new: parent_inputs.len() != cont_vars.len()"
        );
        assert_eq!(
            parent_inputs.len(), n_inputs,
            "LoopOp::new: parent_inputs.len() != subtape.inputs().len()"
        );
        LoopOp { parent_inputs, subtape, condition, cont_vars, exit_vars }
    }
}
