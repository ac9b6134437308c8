use crate::parser::{parse_facts, parse_script};
use crate::{Program, ProgramItem, ResourceLimits, SymbolGenerator, Word};

fn parse(text: &str) -> Program {
    let mut symbols = SymbolGenerator::new();
    parse_script(text, &mut symbols, &ResourceLimits::default()).unwrap()
}

#[test]
fn test_parse_ground_fact() {
    let program = parse("alice likes apples.");
    assert_eq!(program.len(), 1);
    match &program.items[0] {
        ProgramItem::Fact(fact) => assert_eq!(fact.words, vec!["alice", "likes", "apples"]),
        other => panic!("expected a ground fact, got {:?}", other),
    }
}

#[test]
fn test_parse_rule() {
    let program = parse("$x likes $y => $x eats $y.");
    assert_eq!(program.len(), 1);
    match &program.items[0] {
        ProgramItem::Production(production) => {
            assert_eq!(production.predicate.len(), 1);
            assert_eq!(production.result.len(), 1);
            assert_eq!(
                production.predicate[0].words,
                vec![
                    Word::Variable("x".to_string()),
                    Word::Literal("likes".to_string()),
                    Word::Variable("y".to_string()),
                ]
            );
            assert_eq!(
                production.result[0].words[0],
                Word::Variable("x".to_string())
            );
        }
        other => panic!("expected a production, got {:?}", other),
    }
}

#[test]
fn test_ground_detection() {
    let facts = parse_facts("alice likes apples").unwrap();
    assert!(facts[0].is_ground());

    let facts = parse_facts("$x likes $( 1 + 1 ) apples").unwrap();
    assert!(!facts[0].is_ground());
    assert!(facts[0].words[1].is_ground());
}

#[test]
fn test_comma_separates_facts() {
    let facts = parse_facts("a b, c d").unwrap();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].words.len(), 2);
    assert_eq!(facts[1].words.len(), 2);
}

#[test]
fn test_comments_are_skipped() {
    let program = parse("alice (a note (nested inside)) likes apples.");
    match &program.items[0] {
        ProgramItem::Fact(fact) => assert_eq!(fact.words, vec!["alice", "likes", "apples"]),
        other => panic!("expected a ground fact, got {:?}", other),
    }
}

#[test]
fn test_expression_word_keeps_raw_source() {
    let facts = parse_facts("$( 1 + 2 ) things").unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].words[0], Word::Expression(" 1 + 2 ".to_string()));
    assert_eq!(facts[0].words[1], Word::Literal("things".to_string()));
}

#[test]
fn test_nested_parens_in_expression() {
    let facts = parse_facts("$( (1 + 2) * 3 )").unwrap();
    assert_eq!(
        facts[0].words[0],
        Word::Expression(" (1 + 2) * 3 ".to_string())
    );
}

#[test]
fn test_ground_facts_are_simplified_at_parse() {
    let program = parse("$x is new.");
    match &program.items[0] {
        ProgramItem::Fact(fact) => assert_eq!(fact.words, vec!["__sym0", "is", "new"]),
        other => panic!("expected a ground fact, got {:?}", other),
    }
}

#[test]
fn test_top_level_variables_gensym_per_fact() {
    let program = parse("$x a, $x b.");
    let facts: Vec<_> = program.ground_facts().collect();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].words[0], "__sym0");
    assert_eq!(facts[1].words[0], "__sym1");
}

#[test]
fn test_expression_in_ground_fact_is_evaluated() {
    let program = parse("count $( 2 + 3 ).");
    match &program.items[0] {
        ProgramItem::Fact(fact) => assert_eq!(fact.words, vec!["count", "5"]),
        other => panic!("expected a ground fact, got {:?}", other),
    }
}

#[test]
fn test_empty_predicate_is_error() {
    let mut symbols = SymbolGenerator::new();
    let result = parse_script("=> a.", &mut symbols, &ResourceLimits::default());
    assert!(result.is_err());
}

#[test]
fn test_double_arrow_is_error() {
    let mut symbols = SymbolGenerator::new();
    let result = parse_script("a => b => c.", &mut symbols, &ResourceLimits::default());
    assert!(result.is_err());
}

#[test]
fn test_trailing_period_optional_at_end_of_input() {
    let program = parse("alice likes apples");
    assert_eq!(program.len(), 1);

    let program = parse("$x likes $y => $x eats $y");
    assert_eq!(program.productions().count(), 1);
}

#[test]
fn test_program_preserves_declaration_order() {
    let program = parse("a one. $x gate => b two. c three.");
    assert_eq!(program.len(), 3);
    assert!(matches!(program.items[0], ProgramItem::Fact(_)));
    assert!(matches!(program.items[1], ProgramItem::Production(_)));
    assert!(matches!(program.items[2], ProgramItem::Fact(_)));
}

#[test]
fn test_empty_result_rule() {
    let program = parse("a gone =>.");
    match &program.items[0] {
        ProgramItem::Production(production) => {
            assert_eq!(production.predicate.len(), 1);
            assert!(production.result.is_empty());
        }
        other => panic!("expected a production, got {:?}", other),
    }
}

#[test]
fn test_stray_periods_declare_nothing() {
    let program = parse(". .");
    assert!(program.is_empty());
}

#[test]
fn test_script_size_limit() {
    let limits = ResourceLimits {
        max_script_size_bytes: 8,
        ..ResourceLimits::default()
    };
    let mut symbols = SymbolGenerator::new();
    let result = parse_script("alice likes apples.", &mut symbols, &limits);
    assert!(matches!(
        result,
        Err(crate::TenetError::ResourceLimitExceeded { .. })
    ));
}

#[test]
fn test_syntax_error_carries_remainder() {
    let mut symbols = SymbolGenerator::new();
    let error = parse_script("a b ] => [[oops", &mut symbols, &ResourceLimits::default())
        .expect_err("unterminated quote must fail");
    match error {
        crate::TenetError::Syntax(details) => {
            assert!(!details.message.is_empty());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}
