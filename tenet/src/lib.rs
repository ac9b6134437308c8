//! # Tenet Engine
//!
//! **Facts in, consequences out**
//!
//! Tenet is a miniature forward-chaining production engine. Scripts declare
//! ground facts (`alice likes apples.`) and rules
//! (`$x likes $y => $x eats $y.`); the engine matches rule predicates
//! against working memory by unification with backtracking and fires the
//! first applicable rule, over and over, until no rule applies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tenet::{Engine, TenetResult};
//!
//! fn main() -> TenetResult<()> {
//!     let mut engine = Engine::new();
//!
//!     // Seed working memory and load a rule
//!     engine.put("alice likes apples")?;
//!     engine.load("$x likes $y => $x eats $y.")?;
//!
//!     // Chain to fixpoint
//!     engine.run()?;
//!     assert!(engine.facts().contains(&"alice eats apples".to_string()));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Facts
//! A fact is an ordered sequence of words. Pattern facts may contain
//! variables (`$x`) and expressions (`$( $n + 1 )`); ground facts are
//! plain text only. Working memory is a set of ground facts, keyed by a
//! canonical encoding, so re-declaring a fact is a no-op.
//!
//! ### Rules
//! A rule pairs a predicate (facts to match, in order) with a result
//! (facts to produce). Selecting a predicate *consumes* the matched facts
//! from working memory; firing declares the result facts under the
//! bindings the selection established.
//!
//! ### Forward chaining
//! Each cycle walks the program in declaration order and fires the first
//! rule whose predicate selects. A cycle that fires nothing is the
//! fixpoint.

pub mod ast;
pub mod engine;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod render;
pub mod resource_limits;
pub mod semantic;
pub mod unify;

pub use ast::{Span, SymbolGenerator};
pub use engine::{Engine, Firing};
pub use environment::Environment;
pub use error::TenetError;
pub use evaluator::evaluate;
pub use parser::{parse_facts, parse_script};
pub use resource_limits::ResourceLimits;
pub use semantic::*;

/// Result type for tenet operations
pub type TenetResult<T> = Result<T, TenetError>;

#[cfg(test)]
mod tests;
