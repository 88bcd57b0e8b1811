// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module interprets a tape over provided inputs: `play` drives a
//! full pass, `exec` dispatches a single operation, and the Loop branch
//! of `exec` runs the subtape-cursor algorithm of §4.5.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use crate::op::{Fun, OpKind, Operation};
use crate::tape::Tape;
use crate::value::Value;
use crate::variable::{IndexT, OpCell, Variable};
// ---------------------------------------------------------------------------
//
// play
/// Run `tape` to completion over `args` and return its result (§4.5).
///
/// 1. Each `args[i]` overwrites the `val` of the `i`-th Input operation;
///    supplying more arguments than the tape has Inputs is fatal.
/// 2. Every operation executes in tape order via [exec].
/// 3. The value of `tape.result` is returned.
pub fn play<C>(tape : &mut Tape<C>, args : Vec<Value>, trace : bool) -> Value {
    if trace {
        println!("play: begin, {} operations, {} args", tape.len(), args.len());
    }
    seed_inputs(tape, args);
    for i in 0 .. tape.len() {
        let cell = tape.ops[i].clone();
        exec(&cell, trace);
    }
    let result = tape.result.as_ref().unwrap_or_else(|| panic!(
        "play: tape.result is not set"
    ));
    let val = tape.get(result).borrow().val.clone();
    if trace {
        println!("play: end, result = {:?}", val);
    }
    val
}
//
// seed_inputs
fn seed_inputs<C>(tape : &mut Tape<C>, args : Vec<Value>) {
    let inputs = tape.inputs();
    assert!(
        args.len() <= inputs.len(),
        "play: {} args given but tape has only {} inputs", args.len(), inputs.len(),
    );
    for (input, val) in inputs.iter().zip(args.into_iter()) {
        input.as_cell().unwrap().borrow_mut().val = val;
    }
}
// ---------------------------------------------------------------------------
//
// exec
/// Evaluate a single operation in place, assuming every operation it
/// depends on already has its current `val` (guaranteed by tape order
/// plus the tape consistency invariant). Input and Constant are no-ops;
/// Call resolves `fn` and `args` and invokes the callable; Loop runs
/// [exec_loop].
pub fn exec(cell : &OpCell, trace : bool) {
    let mut op = cell.borrow_mut();
    match &mut op.kind {
        OpKind::Input | OpKind::Constant(_) => {}
        OpKind::Call(call) => {
            let callee = resolve_fun(&call.fun);
            let arg_values : Vec<Value> = call.args.iter().map(|a| a.value()).collect();
            if trace {
                println!("exec: {}({:?})", call.fun, arg_values);
            }
            op.val = callee(&arg_values);
        }
        OpKind::Loop(loop_op) => {
            op.val = exec_loop(loop_op, trace);
        }
    }
}
//
// resolve_fun
/// Mirrors [crate::op::call]'s private resolver; duplicated rather than
/// exposed because the executor resolves against *live* tape state while
/// `mkcall`'s is a one-shot construction-time check.
fn resolve_fun(fun : &Fun) -> std::rc::Rc<dyn Fn(&[Value]) -> Value> {
    match fun {
        Fun::Native(named) => named.call.clone(),
        Fun::Dynamic(Variable::Bound(op)) => op.borrow().val.as_function(),
        Fun::Dynamic(Variable::Free(id)) => panic!(
            "exec: free variable %{} cannot be called", id
        ),
    }
}
// ---------------------------------------------------------------------------
//
// exec_loop
/// The subtape-cursor algorithm of §4.5 "Loop execution".
fn exec_loop(loop_op : &mut crate::op::LoopOp, trace : bool) -> Value {
    let n = loop_op.parent_inputs.len();
    let body_start = n as IndexT + 1;

    let initial : Vec<Value> = loop_op.parent_inputs.iter()
        .map(|v| v.as_cell()
            .unwrap_or_else(|| panic!("exec_loop: free parent_input %{}", v.id()))
            .borrow().val.clone())
        .collect();
    seed_inputs(&mut loop_op.subtape, initial);

    if trace {
        println!("exec_loop: begin, {} loop-carried variables", n);
    }

    let mut vi = body_start;
    let mut passes : u64 = 0;
    loop {
        let cell = loop_op.subtape.op_at(vi);
        exec(&cell, trace);

        if vi == loop_op.condition.id() && !cell.borrow().val.as_bool() {
            let exit_values = gather_exit_values(loop_op, vi);
            if trace {
                println!("exec_loop: condition false at %{}, exit", vi);
            }
            return Value::Tuple(exit_values);
        }

        vi += 1;
        if vi > loop_op.subtape.len() as IndexT {
            passes += 1;
            if let Some(cap) = loop_op.subtape.max_loop_iterations() {
                assert!(
                    passes < cap,
                    "exec_loop: loop did not reach its exit condition within {} passes",
                    cap,
                );
            }
            let next_inputs : Vec<Value> = loop_op.cont_vars.iter()
                .map(|v| loop_op.subtape.get(v).borrow().val.clone())
                .collect();
            seed_inputs(&mut loop_op.subtape, next_inputs);
            vi = body_start;
            if trace {
                println!("exec_loop: wrap, pass {}", passes);
            }
        }
    }
}
//
// gather_exit_values
/// When `condition` fires at cursor `vi`, some `cont_vars` for the
/// current iteration may not have been recomputed yet. For each
/// `exit_var`, if the cursor has already passed that `cont_var`'s
/// position, take its freshly updated value; otherwise take the
/// pre-iteration value carried in the matching Input slot.
fn gather_exit_values(loop_op : &crate::op::LoopOp, vi : IndexT) -> Vec<Value> {
    let inputs = loop_op.subtape.inputs();
    loop_op.exit_vars.iter().map(|exit_var| {
        let k = loop_op.cont_vars.iter().position(|c| c.id() == exit_var.id())
            .unwrap_or_else(|| panic!(
                "exec_loop: exit_var %{} is not present in cont_vars", exit_var.id()
            ));
        let cont_var = &loop_op.cont_vars[k];
        if vi > cont_var.id() {
            loop_op.subtape.get(cont_var).borrow().val.clone()
        } else {
            inputs[k].as_cell().unwrap().borrow().val.clone()
        }
    }).collect()
}
