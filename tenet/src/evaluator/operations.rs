//! Arithmetic, comparison, and the builtin function table
//!
//! All operations work over [`Value`] and report failures as plain
//! messages; the expression walker attaches the offending source.

use super::Value;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl ArithmeticOp {
    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(ArithmeticOp::Add),
            "-" => Some(ArithmeticOp::Subtract),
            "*" => Some(ArithmeticOp::Multiply),
            "/" => Some(ArithmeticOp::Divide),
            "%" => Some(ArithmeticOp::Modulo),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "addition",
            ArithmeticOp::Subtract => "subtraction",
            ArithmeticOp::Multiply => "multiplication",
            ArithmeticOp::Divide => "division",
            ArithmeticOp::Modulo => "modulo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComparisonOp {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl ComparisonOp {
    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(ComparisonOp::Less),
            "<=" => Some(ComparisonOp::LessOrEqual),
            ">" => Some(ComparisonOp::Greater),
            ">=" => Some(ComparisonOp::GreaterOrEqual),
            "==" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            _ => None,
        }
    }
}

pub(crate) fn arithmetic(
    left: &Value,
    op: ArithmeticOp,
    right: &Value,
) -> Result<Value, String> {
    let l = number(left, op)?;
    let r = number(right, op)?;

    if matches!(op, ArithmeticOp::Divide | ArithmeticOp::Modulo) && r.is_zero() {
        return Err("division by zero".to_string());
    }

    let result = match op {
        ArithmeticOp::Add => l.checked_add(r),
        ArithmeticOp::Subtract => l.checked_sub(r),
        ArithmeticOp::Multiply => l.checked_mul(r),
        ArithmeticOp::Divide => l.checked_div(r),
        ArithmeticOp::Modulo => l.checked_rem(r),
    };

    result
        .map(Value::Number)
        .ok_or_else(|| format!("numeric overflow in {}", op.name()))
}

pub(crate) fn compare(left: &Value, op: ComparisonOp, right: &Value) -> Result<Value, String> {
    let truth = match op {
        // Equality is canonical-text equality, so `5 == 5.0` holds and
        // text compares to text
        ComparisonOp::Equal => left.render() == right.render(),
        ComparisonOp::NotEqual => left.render() != right.render(),
        _ => {
            let ordering = match (left, right) {
                (Value::Number(l), Value::Number(r)) => l.cmp(r),
                (Value::Text(l), Value::Text(r)) => l.cmp(r),
                _ => {
                    return Err(format!(
                        "cannot order {} and {}",
                        left.kind(),
                        right.kind()
                    ))
                }
            };
            match op {
                ComparisonOp::Less => ordering == Ordering::Less,
                ComparisonOp::LessOrEqual => ordering != Ordering::Greater,
                ComparisonOp::Greater => ordering == Ordering::Greater,
                ComparisonOp::GreaterOrEqual => ordering != Ordering::Less,
                ComparisonOp::Equal | ComparisonOp::NotEqual => unreachable!(),
            }
        }
    };
    Ok(Value::Truth(truth))
}

pub(crate) fn negate(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(number) => Ok(Value::Number(-*number)),
        other => Err(format!(
            "negation requires a numeric operand, got {}",
            other.kind()
        )),
    }
}

/// The fixed builtin table. `sin` and `cos` take degrees.
pub(crate) fn call_builtin(name: &str, args: &[Value]) -> Result<Value, String> {
    match name {
        "min" => fold_numeric(name, args, Decimal::min),
        "max" => fold_numeric(name, args, Decimal::max),
        "abs" => {
            let value = single_numeric(name, args)?;
            Ok(Value::Number(value.abs()))
        }
        "sin" => trig(name, args, f64::sin),
        "cos" => trig(name, args, f64::cos),
        _ => Err(format!("unknown function `{}`", name)),
    }
}

fn fold_numeric(
    name: &str,
    args: &[Value],
    fold: fn(Decimal, Decimal) -> Decimal,
) -> Result<Value, String> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| format!("`{}` needs at least one argument", name))?;
    let mut best = numeric_arg(name, first)?;
    for arg in rest {
        best = fold(best, numeric_arg(name, arg)?);
    }
    Ok(Value::Number(best))
}

fn trig(name: &str, args: &[Value], function: fn(f64) -> f64) -> Result<Value, String> {
    let degrees = single_numeric(name, args)?
        .to_f64()
        .ok_or_else(|| format!("`{}` argument out of range", name))?;
    let result = function(degrees.to_radians());
    Decimal::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| format!("`{}` result is not a finite number", name))
}

fn single_numeric(name: &str, args: &[Value]) -> Result<Decimal, String> {
    match args {
        [only] => numeric_arg(name, only),
        _ => Err(format!("`{}` takes exactly one argument", name)),
    }
}

fn numeric_arg(name: &str, value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Number(number) => Ok(*number),
        other => Err(format!(
            "`{}` requires numeric arguments, got {}",
            name,
            other.kind()
        )),
    }
}

fn number(value: &Value, op: ArithmeticOp) -> Result<Decimal, String> {
    match value {
        Value::Number(number) => Ok(*number),
        other => Err(format!(
            "{} requires numeric operands, got {}",
            op.name(),
            other.kind()
        )),
    }
}
