// SPDX-License-Identifier: EPL-2.0 OR GPL-2.0-or-later
// SPDX-FileContributor: 2026 tracetape contributors
// ---------------------------------------------------------------------------
//
//! `tracetape` is a linearized, mutable intermediate representation for
//! dynamically traced programs.
//!
//! A [Tape] records a sequence of [Operation](op::Operation)s — inputs,
//! constants, function calls, and structured loops — each addressable by
//! a stable [Variable] handle that survives the tape being rewritten
//! around it. Three workflows are supported: incremental construction
//! while tracing a user program, structural rewriting of an already
//! recorded tape (constant folding, inlining, fusing — anything built
//! from [push](rewrite::push), [insert](rewrite::insert),
//! [replace](rewrite::replace) and [rebind](rewrite::rebind)), and
//! playback of a tape over fresh inputs via [exec::play].
//!
//! ```
//! use std::rc::Rc;
//! use tracetape::{Tape, Value};
//! use tracetape::op::{mkcall, Arg, Fun, NamedFn, Operation};
//! use tracetape::rewrite::push;
//! use tracetape::exec::play;
//!
//! let mut tape : Tape = Tape::new();
//! let inputs = tape.set_inputs(vec![Value::Missing, Value::Missing]);
//! let add = Fun::Native(NamedFn::new("+", Rc::new(|args : &[Value]| {
//!     Value::Float(args[0].as_float() + args[1].as_float())
//! })));
//! let sum = push(&mut tape, mkcall(
//!     add, vec![Arg::Var(inputs[0].clone()), Arg::Var(inputs[1].clone())], None, false,
//! ));
//! tape.result = Some(sum);
//!
//! let result = play(&mut tape, vec![Value::Float(2.0), Value::Float(3.0)], false);
//! assert_eq!(result.as_float(), 5.0);
//! ```
// ---------------------------------------------------------------------------
//
pub mod value;
pub mod variable;
pub mod op;
pub mod tape;
pub mod rewrite;
pub mod exec;
pub mod utility;
//
pub use tape::{Tape, TapeId};
pub use value::{Value, ValueKind};
pub use variable::{IndexT, Variable};
