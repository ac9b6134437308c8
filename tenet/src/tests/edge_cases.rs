use crate::parser::{parse_facts, parse_script};
use crate::{ProgramItem, ResourceLimits, SymbolGenerator, TenetError, Word};

fn parse(text: &str) -> crate::Program {
    let mut symbols = SymbolGenerator::new();
    parse_script(text, &mut symbols, &ResourceLimits::default()).unwrap()
}

#[test]
fn test_any_control_character_is_whitespace() {
    let facts = parse_facts("a\tb\nc").unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].words.len(), 3);
}

#[test]
fn test_unreserved_specials_stay_in_bare_words() {
    // `=` without `>` and a lone `)` are ordinary word characters
    let facts = parse_facts("a=b c)d").unwrap();
    assert_eq!(
        facts[0].words,
        vec![
            Word::Literal("a=b".to_string()),
            Word::Literal("c)d".to_string()),
        ]
    );
}

#[test]
fn test_dollar_splits_bare_words() {
    let facts = parse_facts("foo$bar").unwrap();
    assert_eq!(
        facts[0].words,
        vec![
            Word::Literal("foo".to_string()),
            Word::Variable("bar".to_string()),
        ]
    );
}

#[test]
fn test_variable_name_ends_at_specials() {
    let facts = parse_facts("$x, $y").unwrap();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].words, vec![Word::Variable("x".to_string())]);
    assert_eq!(facts[1].words, vec![Word::Variable("y".to_string())]);
}

#[test]
fn test_trailing_comma_is_tolerated() {
    let facts = parse_facts("a one, b two,").unwrap();
    assert_eq!(facts.len(), 2);

    let program = parse("a one, b two,.");
    assert_eq!(program.ground_facts().count(), 2);
}

#[test]
fn test_empty_input_yields_no_facts() {
    assert!(parse_facts("").unwrap().is_empty());
    assert!(parse_facts("   ").unwrap().is_empty());
}

#[test]
fn test_comment_only_script_is_empty() {
    let program = parse("( just a note )");
    assert!(program.is_empty());
}

#[test]
fn test_evaluation_error_during_parse_grounding() {
    let mut symbols = SymbolGenerator::new();
    let result = parse_script(
        "bad $( nope + 1 ).",
        &mut symbols,
        &ResourceLimits::default(),
    );
    assert!(matches!(result, Err(TenetError::Evaluation { .. })));
}

#[test]
fn test_multi_statement_script() {
    let program = parse(
        "( a tiny burn-down )\n\
         stock 2.\n\
         gate true.\n\
         stock $n, gate $( $n > 0 ) => stock $( $n - 1 ), gate true.\n",
    );
    assert_eq!(program.len(), 3);
    assert!(matches!(program.items[2], ProgramItem::Production(_)));
}
