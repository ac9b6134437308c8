//! Unification of pattern facts against ground facts
//!
//! `simplify` turns a pattern fact into a ground one under a set of
//! bindings; `match_fact` tests a pattern against a ground fact and
//! extends a copy of the bindings. A failed match is a normal negative
//! result (`Ok(None)`), never an error; only expression evaluation can
//! fail here, and that failure aborts the enclosing operation.

use crate::ast::SymbolGenerator;
use crate::evaluator::evaluate;
use crate::semantic::{Bindings, Fact, SimpleFact, Word};
use crate::TenetResult;

/// Resolve a pattern fact to a ground fact.
///
/// Literals pass through. Variables resolve to their current binding, or,
/// when unbound, to a freshly minted symbol that is recorded in the
/// bindings so later words and facts see it. Expressions evaluate under
/// the bindings as they stand at that word.
pub fn simplify(
    fact: &Fact,
    bindings: &mut Bindings,
    symbols: &mut SymbolGenerator,
) -> TenetResult<SimpleFact> {
    let mut words = Vec::with_capacity(fact.words.len());
    for word in &fact.words {
        match word {
            Word::Literal(text) => words.push(text.clone()),
            Word::Variable(name) => {
                let value = bindings
                    .entry(name.clone())
                    .or_insert_with(|| symbols.fresh())
                    .clone();
                words.push(value);
            }
            Word::Expression(source) => words.push(evaluate(source, bindings)?),
        }
    }
    Ok(SimpleFact::new(words))
}

/// Test one pattern fact against one ground fact.
///
/// Walks left to right over a copy of the bindings, so the caller never
/// observes partial mutation on failure. Word counts must agree; literal
/// words require exact equality; variables bind on first sight and must
/// agree thereafter; expression words evaluate under the bindings
/// accumulated so far and must equal the ground word textually.
pub fn match_fact(
    ground: &SimpleFact,
    pattern: &Fact,
    bindings: &Bindings,
) -> TenetResult<Option<Bindings>> {
    if ground.words.len() != pattern.words.len() {
        return Ok(None);
    }

    let mut bindings = bindings.clone();
    for (ground_word, word) in ground.words.iter().zip(&pattern.words) {
        let matched = match word {
            Word::Literal(text) => text == ground_word,
            Word::Variable(name) => match bindings.get(name) {
                Some(bound) => bound == ground_word,
                None => {
                    bindings.insert(name.clone(), ground_word.clone());
                    true
                }
            },
            Word::Expression(source) => evaluate(source, &bindings)? == *ground_word,
        };
        if !matched {
            return Ok(None);
        }
    }

    Ok(Some(bindings))
}
