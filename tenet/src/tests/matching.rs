use crate::parser::parse_facts;
use crate::semantic::{Bindings, Fact, SimpleFact};
use crate::unify::{match_fact, simplify};
use crate::SymbolGenerator;

fn ground(text: &str) -> SimpleFact {
    SimpleFact::new(text.split_whitespace().map(String::from).collect())
}

fn pattern(text: &str) -> Fact {
    let mut facts = parse_facts(text).unwrap();
    assert_eq!(facts.len(), 1, "expected a single fact in {:?}", text);
    facts.remove(0)
}

#[test]
fn test_ground_pattern_is_equality_only() {
    let fact = ground("alice likes apples");
    let same = pattern("alice likes apples");
    let different = pattern("alice likes pears");

    // Binding-independent: pre-existing bindings change nothing
    let mut noise = Bindings::new();
    noise.insert("alice".to_string(), "bob".to_string());

    assert!(match_fact(&fact, &same, &Bindings::new()).unwrap().is_some());
    assert!(match_fact(&fact, &same, &noise).unwrap().is_some());
    assert!(match_fact(&fact, &different, &Bindings::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_word_count_mismatch_fails() {
    let fact = ground("alice likes apples");
    assert!(match_fact(&fact, &pattern("alice likes"), &Bindings::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_variables_bind_on_first_sight() {
    let fact = ground("alice likes apples");
    let bindings = match_fact(&fact, &pattern("$x likes $y"), &Bindings::new())
        .unwrap()
        .expect("pattern should match");
    assert_eq!(bindings.get("x").map(String::as_str), Some("alice"));
    assert_eq!(bindings.get("y").map(String::as_str), Some("apples"));
}

#[test]
fn test_repeated_variable_must_agree() {
    let same = ground("alice likes alice");
    let different = ground("alice likes apples");
    let repeated = pattern("$x likes $x");

    assert!(match_fact(&same, &repeated, &Bindings::new())
        .unwrap()
        .is_some());
    assert!(match_fact(&different, &repeated, &Bindings::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_prebound_variable_is_respected() {
    let mut bindings = Bindings::new();
    bindings.insert("x".to_string(), "bob".to_string());

    assert!(
        match_fact(&ground("alice is tall"), &pattern("$x is tall"), &bindings)
            .unwrap()
            .is_none()
    );
    assert!(
        match_fact(&ground("bob is tall"), &pattern("$x is tall"), &bindings)
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_failure_leaves_caller_bindings_untouched() {
    let bindings = Bindings::new();
    // First word binds, second mismatches; the whole match fails
    let result = match_fact(&ground("bob b"), &pattern("$x a"), &bindings).unwrap();
    assert!(result.is_none());
    assert!(bindings.is_empty());
}

#[test]
fn test_earlier_words_feed_later_expressions() {
    let bindings = match_fact(
        &ground("2 3"),
        &pattern("$x $( $x + 1 )"),
        &Bindings::new(),
    )
    .unwrap();
    assert!(bindings.is_some());

    let mismatch = match_fact(
        &ground("2 4"),
        &pattern("$x $( $x + 1 )"),
        &Bindings::new(),
    )
    .unwrap();
    assert!(mismatch.is_none());
}

#[test]
fn test_expression_failure_propagates() {
    let result = match_fact(&ground("5"), &pattern("$( $y + 1 )"), &Bindings::new());
    assert!(result.is_err());
}

#[test]
fn test_simplify_allocates_fresh_symbols() {
    let mut bindings = Bindings::new();
    let mut symbols = SymbolGenerator::new();
    let fact = simplify(&pattern("$x knows $x"), &mut bindings, &mut symbols).unwrap();
    assert_eq!(fact.words, vec!["__sym0", "knows", "__sym0"]);
    assert_eq!(bindings.get("x").map(String::as_str), Some("__sym0"));
}

#[test]
fn test_simplify_resolves_bound_variables_and_expressions() {
    let mut bindings = Bindings::new();
    bindings.insert("n".to_string(), "6".to_string());
    let mut symbols = SymbolGenerator::new();
    let fact = simplify(&pattern("total $( $n * 7 )"), &mut bindings, &mut symbols).unwrap();
    assert_eq!(fact.words, vec!["total", "42"]);
}
