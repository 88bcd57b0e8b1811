// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! This module builds Call operations: the function-application IR node,
//! with the construction-time calculability check and eager evaluation of
//! §4.2.
//!
//! Link to [parent module](super)
// ---------------------------------------------------------------------------
//
use std::fmt;
use std::rc::Rc;
//
use crate::op::Operation;
use crate::value::Value;
use crate::variable::Variable;
// ---------------------------------------------------------------------------
//
// NamedFn
/// A native callable with a display name, used as the `fn` of a Call that
/// is not itself produced by an earlier operation.
///
/// The name `"broadcast"` is special-cased by [fmt::Display] to print as
/// `Broadcasted{}`, matching the higher-order display rule of §6.
#[derive(Clone)]
pub struct NamedFn {
    pub name : &'static str,
    pub call : Rc<dyn Fn(&[Value]) -> Value>,
}
impl NamedFn {
    pub fn new(name : &'static str, call : Rc<dyn Fn(&[Value]) -> Value>) -> Self {
        NamedFn { name, call }
    }
}
impl fmt::Display for NamedFn {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        if self.name == "broadcast" {
            write!(f, "Broadcasted{{}}")
        } else {
            write!(f, "{}", self.name)
        }
    }
}
// ---------------------------------------------------------------------------
//
// Fun
/// `fn` is either a concrete function/type ([Fun::Native]) or a Variable
/// whose referent's cached value is itself a callable ([Fun::Dynamic]);
/// see §3 "Operation: Call".
#[derive(Clone)]
pub enum Fun {
    Native(NamedFn),
    Dynamic(Variable),
}
impl fmt::Display for Fun {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fun::Native(named) => write!(f, "{}", named),
            Fun::Dynamic(v)    => write!(f, "{}", v),
        }
    }
}
// ---------------------------------------------------------------------------
//
// Arg
/// One element of a Call's argument list: a positional reference to an
/// earlier operation, or a raw constant value.
#[derive(Clone)]
pub enum Arg {
    Var(Variable),
    Const(Value),
}
impl Arg {
    //
    // is_known
    /// true iff this argument is "not a Variable" or "a bound Variable
    /// whose referent already has a non-sentinel val" — the per-argument
    /// half of the calculability check in §4.2 step 2.
    pub fn is_known(&self) -> bool {
        match self {
            Arg::Const(_)              => true,
            Arg::Var(Variable::Bound(op)) => !op.borrow().val.is_missing(),
            Arg::Var(Variable::Free(_))   => false,
        }
    }
    //
    // value
    /// Resolve to a [Value]: a bound Variable's referent's cached val, or
    /// the constant itself. Panics (an indexing failure per §7) if given
    /// a free Variable, which has no cached value to read.
    pub fn value(&self) -> Value {
        match self {
            Arg::Const(v) => v.clone(),
            Arg::Var(Variable::Bound(op)) => op.borrow().val.clone(),
            Arg::Var(Variable::Free(id)) => panic!(
                "Arg::value: free variable %{} has no referent to read", id
            ),
        }
    }
}
impl fmt::Display for Arg {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Var(v)   => write!(f, "{}", v),
            Arg::Const(v) => write!(f, "{:?}", v),
        }
    }
}
// ---------------------------------------------------------------------------
//
// CallOp
/// A function application: `fn(args…)`.
#[derive(Clone)]
pub struct CallOp {
    pub fun  : Fun,
    pub args : Vec<Arg>,
}
// ---------------------------------------------------------------------------
//
// resolve_fun
/// Resolve `fun` to a callable, looking through Variable indirection when
/// `fun` is itself a Variable pointing at an earlier Call (§4.5 step 2).
fn resolve_fun(fun : &Fun) -> Rc<dyn Fn(&[Value]) -> Value> {
    match fun {
        Fun::Native(named) => named.call.clone(),
        Fun::Dynamic(Variable::Bound(op)) => op.borrow().val.as_function(),
        Fun::Dynamic(Variable::Free(id)) => panic!(
            "resolve_fun: free variable %{} cannot be called", id
        ),
    }
}
//
// fun_is_known
fn fun_is_known(fun : &Fun) -> bool {
    match fun {
        Fun::Native(_)                     => true,
        Fun::Dynamic(Variable::Bound(op))  => !op.borrow().val.is_missing(),
        Fun::Dynamic(Variable::Free(_))    => false,
    }
}
// ---------------------------------------------------------------------------
//
// mkcall
/// Build a Call operation; see §4.2.
///
/// * fun :
/// is a function, a type (used as a constructor), or a Variable whose
/// referent's value will be the callable.
///
/// * args :
/// the ordered argument list.
///
/// * val :
/// if `None`, and the call is calculable (every element of `(fun, args…)`
/// is either not a Variable or a bound Variable with a known value), `fun`
/// is evaluated eagerly and its result becomes the operation's `val`.
/// Otherwise the supplied value (default: [Value::Missing]) is stored
/// verbatim, with no evaluation performed — this is how transform passes
/// build symbolic or placeholder operations.
///
/// * trace :
/// if true, a one-line trace of the calculability decision is printed.
///
/// The returned [Operation] has `id == 0`; push it onto a tape (see
/// [crate::rewrite::push]) to give it a position.
pub fn mkcall(
    fun   : Fun,
    args  : Vec<Arg>,
    val   : Option<Value>,
    trace : bool,
) -> Operation {
    let calculable = fun_is_known(&fun) && args.iter().all(Arg::is_known);
    let resolved_val = match val {
        Some(v) => v,
        None if calculable => {
            let callee       = resolve_fun(&fun);
            let arg_values : Vec<Value> =
                args.iter().map(Arg::value).collect();
            let result        = callee(&arg_values);
            if trace {
                println!(
                    "mkcall: {}({:?}) = {:?}", fun, arg_values, result
                );
            }
            result
        }
        None => {
            if trace {
                println!("mkcall: {} not calculable, val = missing", fun);
            }
            Value::Missing
        }
    };
    Operation {
        id   : 0,
        val  : resolved_val,
        kind : crate::op::OpKind::Call(CallOp { fun, args }),
    }
}
