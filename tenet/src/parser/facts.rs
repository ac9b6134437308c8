use crate::error::TenetError;
use crate::parser::Rule;
use crate::semantic::{Fact, Word};
use crate::TenetResult;
use pest::iterators::Pair;

pub(crate) fn parse_fact_list(pair: Pair<Rule>) -> TenetResult<Vec<Fact>> {
    let mut facts = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::fact {
            facts.push(parse_fact(inner)?);
        }
    }
    Ok(facts)
}

fn parse_fact(pair: Pair<Rule>) -> TenetResult<Fact> {
    let mut words = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::word {
            words.push(parse_word(inner)?);
        }
    }
    Ok(Fact::new(words))
}

fn parse_word(pair: Pair<Rule>) -> TenetResult<Word> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| TenetError::Engine("grammar error: word without variant".to_string()))?;

    Ok(match inner.as_rule() {
        Rule::bare_word => Word::Literal(inner.as_str().to_string()),
        Rule::quoted_word => Word::Literal(body_text(inner, Rule::quoted_body)?),
        Rule::var_word => Word::Variable(body_text(inner, Rule::var_name)?),
        Rule::expr_word => Word::Expression(body_text(inner, Rule::expr_body)?),
        other => {
            return Err(TenetError::Engine(format!(
                "grammar error: unexpected word variant {:?}",
                other
            )))
        }
    })
}

fn body_text(pair: Pair<Rule>, rule: Rule) -> TenetResult<String> {
    for inner in pair.into_inner() {
        if inner.as_rule() == rule {
            return Ok(inner.as_str().to_string());
        }
    }
    Err(TenetError::Engine(format!(
        "grammar error: missing {:?} body",
        rule
    )))
}
