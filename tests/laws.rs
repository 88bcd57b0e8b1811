// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
// Black-box exercises of the four laws named in SPEC_FULL.md §8, each as
// its own test so a failure names the law, not just a scenario number.
//
use std::rc::Rc;

use rustc_hash::FxHashMap;

use tracetape::op::{mkcall, Arg, Fun, NamedFn, OpKind};
use tracetape::rewrite::{insert, push, rebind};
use tracetape::utility::bound;
use tracetape::value::Value;
use tracetape::variable::Variable;
use tracetape::Tape;

fn mul() -> Fun {
    Fun::Native(NamedFn::new("*", Rc::new(|args : &[Value]| {
        Value::Float(args[0].as_float() * args[1].as_float())
    })))
}

// Bound-id tracking: inserting k ops at idx increments the observed id
// of every bound Variable that was >= idx by exactly k.
#[test]
fn law_bound_id_tracking() {
    let mut tape : Tape = Tape::new();
    let inputs = tape.set_inputs(vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)]);
    let before : Vec<u32> = inputs.iter().map(|v| v.id()).collect();

    let idx = inputs[1].id();
    insert(&mut tape, idx, vec![
        tracetape::op::Operation::new_constant(Value::Float(9.0)),
        tracetape::op::Operation::new_constant(Value::Float(9.0)),
    ]);

    assert_eq!(inputs[0].id(), before[0], "operations before idx are untouched");
    assert_eq!(inputs[1].id(), before[1] + 2, "idx itself shifts by k");
    assert_eq!(inputs[2].id(), before[2] + 2, "operations after idx shift by k");
}

// Rebind equivalence: after rebind(T, {a -> b}), every Call arg whose
// previous id was a now reports id == b.
#[test]
fn law_rebind_equivalence() {
    let mut tape : Tape = Tape::new();
    let inputs = tape.set_inputs(vec![Value::Float(1.0), Value::Float(2.0)]);
    let a = inputs[0].clone();
    let b = inputs[1].clone();
    let call = push(&mut tape, mkcall(mul(), vec![Arg::Var(a.clone()), Arg::Const(Value::Float(3.0))], None, false));

    let mut substitutions = FxHashMap::default();
    substitutions.insert(a.id(), tape.get(&b));
    rebind(&mut tape, &substitutions, 1 .. (tape.len() as u32 + 1));

    match &tape.get(&call).borrow().kind {
        OpKind::Call(c) => match &c.args[0] {
            Arg::Var(v) => assert_eq!(v.id(), b.id()),
            _ => panic!("expected a Var argument"),
        },
        _ => panic!("expected a Call operation"),
    }
}

// mkcall calculation: when all arguments are bound or constant,
// mkcall(f, args…).val == f(values(args)…); otherwise .val == missing.
#[test]
fn law_mkcall_calculation() {
    let mut tape : Tape = Tape::new();
    let inputs = tape.set_inputs(vec![Value::Float(4.0)]);
    let bound_val = inputs[0].clone();

    let calculable = mkcall(mul(), vec![Arg::Var(bound_val), Arg::Const(Value::Float(5.0))], None, false);
    assert_eq!(calculable.val.as_float(), 20.0);

    let missing = mkcall(mul(), vec![Arg::Var(Variable::Free(1)), Arg::Const(Value::Float(5.0))], None, false);
    assert!(missing.val.is_missing());
}

// Variable equality: bound(T, v) == the Variable already referencing the
// same operation, but bound(T, v) != V(v.id) (the free variant with the
// same numeric identifier).
#[test]
fn law_variable_equality() {
    let mut tape : Tape = Tape::new();
    let inputs = tape.set_inputs(vec![Value::Float(1.0)]);
    let v = inputs[0].clone();

    let resolved = bound(&tape, &Variable::Free(v.id()));
    assert_eq!(resolved, v, "bound(T, v) must equal the Variable already referencing the same operation");
    assert_ne!(resolved, Variable::Free(v.id()), "bound(T, v) must not equal the free variant with the same id");
}
