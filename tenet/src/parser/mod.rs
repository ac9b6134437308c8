//! Parser for the tenet rule language
//!
//! Turns script text into a [`Program`]: ground facts and rules in
//! declaration order. Standalone fact statements are grounded here
//! (top-level variables become fresh symbols, embedded expressions are
//! evaluated), so the program carries only [`SimpleFact`]s and
//! [`Production`]s by the time the engine sees it.

use crate::ast::{Span, SymbolGenerator};
use crate::error::TenetError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::{Bindings, Fact, Production, Program, ProgramItem, SimpleFact};
use crate::unify::simplify;
use crate::TenetResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod facts;

#[derive(Parser)]
#[grammar = "src/parser/script.pest"]
pub struct ScriptParser;

/// Parse a complete script into a program.
///
/// Fails with [`TenetError::Syntax`] on malformed input (unterminated
/// quote/comment/expression, missing terminator, empty predicate before
/// `=>`); no partial program is returned. Grounding a standalone fact can
/// also fail with [`TenetError::Evaluation`] when one of its expressions
/// does not evaluate.
pub fn parse_script(
    text: &str,
    symbols: &mut SymbolGenerator,
    limits: &ResourceLimits,
) -> TenetResult<Program> {
    if text.len() > limits.max_script_size_bytes {
        return Err(TenetError::ResourceLimitExceeded {
            limit_name: "max_script_size_bytes".to_string(),
            limit_value: limits.max_script_size_bytes.to_string(),
            actual_value: text.len().to_string(),
            suggestion: "Split the script into smaller pieces".to_string(),
        });
    }

    let pairs = ScriptParser::parse(Rule::script, text).map_err(|error| syntax_error(error, text))?;

    let mut items = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::script {
            continue;
        }
        for statement in pair.into_inner() {
            if statement.as_rule() != Rule::statement {
                continue;
            }
            for inner in statement.into_inner() {
                match inner.as_rule() {
                    Rule::declaration => {
                        for fact in declared_facts(inner, symbols)? {
                            items.push(ProgramItem::Fact(fact));
                        }
                    }
                    Rule::production => {
                        items.push(ProgramItem::Production(parse_production(inner)?));
                    }
                    // Stray periods declare nothing
                    _ => {}
                }
            }
        }
    }

    Ok(Program { items })
}

/// Parse a bare fact list, as used for predicates and `put` input.
///
/// The facts are returned as patterns: variables and expressions are kept
/// as-is. An empty or comment-only input yields no facts.
pub fn parse_facts(text: &str) -> TenetResult<Vec<Fact>> {
    let pairs =
        ScriptParser::parse(Rule::facts_input, text).map_err(|error| syntax_error(error, text))?;

    for pair in pairs {
        if pair.as_rule() != Rule::facts_input {
            continue;
        }
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::fact_list {
                return facts::parse_fact_list(inner);
            }
        }
    }

    Ok(Vec::new())
}

/// Ground the facts of a standalone declaration. Each fact gets fresh
/// bindings, so `$x a, $x b.` allocates two distinct symbols.
fn declared_facts(
    pair: Pair<Rule>,
    symbols: &mut SymbolGenerator,
) -> TenetResult<Vec<SimpleFact>> {
    let fact_list = pair
        .into_inner()
        .find(|inner| inner.as_rule() == Rule::fact_list)
        .ok_or_else(|| TenetError::Engine("grammar error: declaration without fact list".to_string()))?;

    let mut grounded = Vec::new();
    for fact in facts::parse_fact_list(fact_list)? {
        let mut bindings = Bindings::new();
        grounded.push(simplify(&fact, &mut bindings, symbols)?);
    }
    Ok(grounded)
}

fn parse_production(pair: Pair<Rule>) -> TenetResult<Production> {
    let mut lists = pair
        .into_inner()
        .filter(|inner| inner.as_rule() == Rule::fact_list);

    let predicate = lists
        .next()
        .map(facts::parse_fact_list)
        .transpose()?
        .ok_or_else(|| TenetError::Engine("grammar error: production without predicate".to_string()))?;

    // The result list is absent for `p =>.` rules
    let result = lists
        .next()
        .map(facts::parse_fact_list)
        .transpose()?
        .unwrap_or_default();

    Ok(Production { predicate, result })
}

fn syntax_error(error: pest::error::Error<Rule>, source: &str) -> TenetError {
    use pest::error::{InputLocation, LineColLocation};

    let (start, end) = match error.location {
        InputLocation::Pos(pos) => (pos, (pos + 1).min(source.len())),
        InputLocation::Span((start, end)) => (start, end),
    };
    let (line, col) = match error.line_col {
        LineColLocation::Pos((line, col)) => (line, col),
        LineColLocation::Span((start_line, start_col), (_, _)) => (start_line, start_col),
    };

    let snippet = source[start..].chars().take(40).collect::<String>();

    TenetError::syntax(
        format!("{}", error.variant),
        Span {
            start,
            end,
            line,
            col,
        },
        Arc::from(source),
        snippet.trim(),
    )
}
