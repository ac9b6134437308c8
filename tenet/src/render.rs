//! Source-equivalent rendering of facts, rules, and firing traces
//!
//! The `Display` impls on the data model give back text the parser
//! accepts (round-trip); this module adds the bindings-substituted forms
//! used for trace output.

use crate::engine::Firing;
use crate::evaluator::evaluate;
use crate::semantic::{Bindings, Fact, Production, Word};
use crate::TenetResult;

/// Re-quote a word for display: whitespace-bearing text goes back into
/// its `[[...]]` form, everything else is emitted bare.
pub(crate) fn quote_word(text: &str) -> String {
    if text.chars().any(char::is_whitespace) {
        format!("[[{}]]", text)
    } else {
        text.to_string()
    }
}

pub(crate) fn join_production(predicate: &[String], result: &[String]) -> String {
    let predicate = predicate.join(", ");
    if result.is_empty() {
        format!("{} =>.", predicate)
    } else {
        format!("{} =>\n  {}.", predicate, result.join(",\n  "))
    }
}

/// Render a pattern fact with bindings substituted: variables resolve to
/// their bound values (unbound ones stay in `$name` form) and expressions
/// evaluate.
pub fn bound_fact(fact: &Fact, bindings: &Bindings) -> TenetResult<String> {
    let mut words = Vec::with_capacity(fact.words.len());
    for word in &fact.words {
        words.push(match word {
            Word::Literal(text) => quote_word(text),
            Word::Variable(name) => match bindings.get(name) {
                Some(value) => value.clone(),
                None => format!("${}", name),
            },
            Word::Expression(source) => evaluate(source, bindings)?,
        });
    }
    Ok(words.join(" "))
}

/// Render a rule with bindings substituted throughout
pub fn bound_production(production: &Production, bindings: &Bindings) -> TenetResult<String> {
    let mut predicate = Vec::with_capacity(production.predicate.len());
    for fact in &production.predicate {
        predicate.push(bound_fact(fact, bindings)?);
    }
    let mut result = Vec::with_capacity(production.result.len());
    for fact in &production.result {
        result.push(bound_fact(fact, bindings)?);
    }
    Ok(join_production(&predicate, &result))
}

impl Firing {
    /// Human-readable trace of this firing: the rule as written, then
    /// the rule under the firing's bindings.
    pub fn trace_string(&self) -> TenetResult<String> {
        Ok(format!(
            "{}\n(\n{}\n)",
            self.production,
            bound_production(&self.production, &self.bindings)?
        ))
    }
}
