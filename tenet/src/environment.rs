//! Working memory and the backtracking selector
//!
//! The environment is a set of ground facts keyed by their canonical
//! textual encoding: re-declaring an existing fact is a no-op and there
//! is no fact multiplicity. A sorted map keeps iteration deterministic;
//! the selector additionally materializes the candidates once per call,
//! so its cursors stay valid for the whole search.

use crate::ast::SymbolGenerator;
use crate::semantic::{Bindings, Fact, SimpleFact};
use crate::unify::{match_fact, simplify};
use crate::TenetResult;
use std::collections::BTreeMap;

/// The mutable set of currently-true ground facts
#[derive(Debug, Clone, Default)]
pub struct Environment {
    facts: BTreeMap<String, SimpleFact>,
}

/// A satisfying assignment found by [`Environment::solve`]: the final
/// bindings plus the keys of every fact the assignment consumed.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub(crate) bindings: Bindings,
    pub(crate) consumed: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a ground fact. Returns whether the fact was new; inserting
    /// an existing fact leaves the environment unchanged.
    pub fn insert(&mut self, fact: SimpleFact) -> bool {
        self.facts.insert(fact.key(), fact).is_none()
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<SimpleFact> {
        self.facts.remove(key)
    }

    pub fn contains(&self, fact: &SimpleFact) -> bool {
        self.facts.contains_key(&fact.key())
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }

    /// Iterate the facts in canonical-key order
    pub fn iter(&self) -> impl Iterator<Item = &SimpleFact> {
        self.facts.values()
    }

    /// Ground the given facts under one shared set of bindings and insert
    /// them all.
    ///
    /// Every fact is simplified before anything is inserted, so an
    /// evaluation failure leaves the environment untouched.
    pub fn declare(
        &mut self,
        facts: &[Fact],
        bindings: &mut Bindings,
        symbols: &mut SymbolGenerator,
    ) -> TenetResult<()> {
        let mut grounded = Vec::with_capacity(facts.len());
        for fact in facts {
            grounded.push(simplify(fact, bindings, symbols)?);
        }
        for fact in grounded {
            self.insert(fact);
        }
        Ok(())
    }

    /// Find facts satisfying the whole predicate and retract them.
    ///
    /// On success the consumed facts are removed from the environment and
    /// the final bindings are returned; on failure (`Ok(None)`) nothing
    /// changes. Only expression evaluation can surface an error, and it
    /// aborts the call before any mutation.
    pub fn select(&mut self, predicate: &[Fact]) -> TenetResult<Option<Bindings>> {
        match self.solve(predicate)? {
            Some(selection) => {
                for key in &selection.consumed {
                    self.facts.remove(key);
                }
                Ok(Some(selection.bindings))
            }
            None => Ok(None),
        }
    }

    /// Chronological backtracking over the predicate positions.
    ///
    /// Each position keeps a cursor into the candidate list and the
    /// bindings as they stood before the position was attempted. A
    /// position may not consume a fact an earlier position already holds.
    /// When a position exhausts its candidates, the previous position
    /// resumes scanning right after its last successful index; exhausting
    /// position zero fails the whole selection.
    pub(crate) fn solve(&self, predicate: &[Fact]) -> TenetResult<Option<Selection>> {
        let candidates: Vec<(&String, &SimpleFact)> = self.facts.iter().collect();

        // Assignments for positions already satisfied
        let mut chosen: Vec<usize> = Vec::new();
        // Cursor per position, one entry ahead of `chosen`
        let mut cursors: Vec<usize> = vec![0];
        // Bindings entering each position
        let mut binding_stack: Vec<Bindings> = vec![Bindings::new()];

        while chosen.len() < predicate.len() {
            let position = chosen.len();
            let pattern = &predicate[position];

            let mut found = None;
            let mut index = cursors[position];
            while index < candidates.len() {
                if chosen.contains(&index) {
                    index += 1;
                    continue;
                }
                if let Some(bindings) =
                    match_fact(candidates[index].1, pattern, &binding_stack[position])?
                {
                    found = Some((index, bindings));
                    break;
                }
                index += 1;
            }

            match found {
                Some((index, bindings)) => {
                    chosen.push(index);
                    cursors.push(0);
                    binding_stack.push(bindings);
                }
                None => {
                    cursors.pop();
                    binding_stack.pop();
                    match chosen.pop() {
                        Some(previous) => {
                            if let Some(cursor) = cursors.last_mut() {
                                *cursor = previous + 1;
                            }
                        }
                        // Nothing left to back into
                        None => return Ok(None),
                    }
                }
            }
        }

        let bindings = binding_stack.pop().unwrap_or_default();
        let consumed = chosen
            .iter()
            .map(|&index| candidates[index].0.clone())
            .collect();
        Ok(Some(Selection { bindings, consumed }))
    }
}
