//! Recursive evaluation of parsed expression pairs

use super::operations::{self, ArithmeticOp, ComparisonOp};
use super::Value;
use crate::error::TenetError;
use crate::semantic::Bindings;
use crate::TenetResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use rust_decimal::Decimal;

#[derive(Parser)]
#[grammar = "src/evaluator/expr.pest"]
struct ExprParser;

pub(crate) fn evaluate_expression(source: &str, bindings: &Bindings) -> TenetResult<Value> {
    let context = ExprContext { source, bindings };

    let pairs = ExprParser::parse(Rule::expression, source)
        .map_err(|error| context.error(format!("malformed expression: {}", error.variant)))?;

    for pair in pairs {
        if pair.as_rule() != Rule::expression {
            continue;
        }
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::comparison {
                return context.eval_comparison(inner);
            }
        }
    }

    Err(TenetError::Engine(
        "grammar error: expression without comparison".to_string(),
    ))
}

struct ExprContext<'a> {
    source: &'a str,
    bindings: &'a Bindings,
}

impl ExprContext<'_> {
    fn error(&self, message: impl Into<String>) -> TenetError {
        TenetError::evaluation(message, self.source)
    }

    fn grammar_error(&self, what: &str) -> TenetError {
        TenetError::Engine(format!("grammar error: {}", what))
    }

    fn eval_comparison(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        let mut inner = pair.into_inner();
        let left = self.eval_sum(
            inner
                .next()
                .ok_or_else(|| self.grammar_error("empty comparison"))?,
        )?;

        match (inner.next(), inner.next()) {
            (Some(op_pair), Some(right_pair)) => {
                let op = ComparisonOp::from_symbol(op_pair.as_str())
                    .ok_or_else(|| self.grammar_error("unknown comparison operator"))?;
                let right = self.eval_sum(right_pair)?;
                operations::compare(&left, op, &right).map_err(|message| self.error(message))
            }
            _ => Ok(left),
        }
    }

    fn eval_sum(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        let mut inner = pair.into_inner();
        let mut value = self.eval_product(
            inner
                .next()
                .ok_or_else(|| self.grammar_error("empty sum"))?,
        )?;

        while let Some(op_pair) = inner.next() {
            let right_pair = inner
                .next()
                .ok_or_else(|| self.grammar_error("dangling sum operator"))?;
            let op = ArithmeticOp::from_symbol(op_pair.as_str())
                .ok_or_else(|| self.grammar_error("unknown sum operator"))?;
            let right = self.eval_product(right_pair)?;
            value = operations::arithmetic(&value, op, &right)
                .map_err(|message| self.error(message))?;
        }

        Ok(value)
    }

    fn eval_product(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        let mut inner = pair.into_inner();
        let mut value = self.eval_unary(
            inner
                .next()
                .ok_or_else(|| self.grammar_error("empty product"))?,
        )?;

        while let Some(op_pair) = inner.next() {
            let right_pair = inner
                .next()
                .ok_or_else(|| self.grammar_error("dangling product operator"))?;
            let op = ArithmeticOp::from_symbol(op_pair.as_str())
                .ok_or_else(|| self.grammar_error("unknown product operator"))?;
            let right = self.eval_unary(right_pair)?;
            value = operations::arithmetic(&value, op, &right)
                .map_err(|message| self.error(message))?;
        }

        Ok(value)
    }

    fn eval_unary(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        let mut negations = 0usize;
        let mut primary = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::neg_op => negations += 1,
                Rule::primary => primary = Some(inner),
                _ => {}
            }
        }

        let mut value =
            self.eval_primary(primary.ok_or_else(|| self.grammar_error("unary without operand"))?)?;
        for _ in 0..negations {
            value = operations::negate(&value).map_err(|message| self.error(message))?;
        }
        Ok(value)
    }

    fn eval_primary(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::number => {
                    return inner
                        .as_str()
                        .parse::<Decimal>()
                        .map(Value::Number)
                        .map_err(|_| {
                            self.error(format!("invalid number `{}`", inner.as_str()))
                        });
                }
                Rule::call => return self.eval_call(inner),
                Rule::identifier => return self.resolve(inner.as_str()),
                Rule::comparison => return self.eval_comparison(inner),
                _ => {}
            }
        }
        Err(self.grammar_error("empty primary expression"))
    }

    fn eval_call(&self, pair: Pair<Rule>) -> TenetResult<Value> {
        let mut inner = pair.into_inner();
        let name_pair = inner
            .next()
            .ok_or_else(|| self.grammar_error("call without function name"))?;
        let name = strip_sigil(name_pair.as_str());

        let mut args = Vec::new();
        for arg in inner {
            if arg.as_rule() == Rule::comparison {
                args.push(self.eval_comparison(arg)?);
            }
        }

        operations::call_builtin(name, &args).map_err(|message| self.error(message))
    }

    fn resolve(&self, name: &str) -> TenetResult<Value> {
        let name = strip_sigil(name);
        match self.bindings.get(name) {
            Some(text) => Ok(Value::from_text(text)),
            None => Err(self.error(format!("unbound identifier `{}`", name))),
        }
    }
}

/// Identifiers may be written with the rule-language `$` sigil
fn strip_sigil(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}
