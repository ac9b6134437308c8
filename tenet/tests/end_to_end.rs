//! End-to-end scenarios through the public API

use tenet::{Engine, ResourceLimits, TenetError};

#[test]
fn seeded_environment_chains_to_fixpoint() {
    let mut engine = Engine::new();
    engine.put("socrates is human").unwrap();
    engine
        .load("$x is human => $x is mortal.\n$x is mortal => $x is remembered.\n")
        .unwrap();

    assert!(engine.run().unwrap());
    assert_eq!(engine.facts(), vec!["socrates is remembered".to_string()]);

    // Fixpoint: a second run fires nothing and changes nothing
    assert!(!engine.run().unwrap());
    assert_eq!(engine.facts(), vec!["socrates is remembered".to_string()]);
}

#[test]
fn expression_guards_terminate_a_countdown() {
    let mut engine = Engine::new();
    engine.put("countdown 3, go true").unwrap();
    engine
        .load("countdown $n, go $( $n > 0 ) => countdown $( $n - 1 ), go true.")
        .unwrap();

    assert!(engine.run().unwrap());
    assert_eq!(
        engine.facts(),
        vec!["countdown 0".to_string(), "go true".to_string()]
    );
}

#[test]
fn quoted_literals_survive_matching_and_rendering() {
    let mut engine = Engine::new();
    engine.put("note [[hello world]]").unwrap();
    engine.load("note $text => shouted $text.").unwrap();

    assert!(engine.run().unwrap());
    assert_eq!(engine.facts(), vec!["shouted [[hello world]]".to_string()]);
}

#[test]
fn traces_render_the_fired_rule_under_its_bindings() {
    let mut engine = Engine::new();
    engine.put("alice likes apples").unwrap();
    engine.load("$x likes $y => $x eats $y.").unwrap();

    let firing = engine.tick_trace().unwrap().expect("the rule fires");
    let trace = firing.trace_string().unwrap();
    assert_eq!(
        trace,
        "$x likes $y =>\n  $x eats $y.\n(\nalice likes apples =>\n  alice eats apples.\n)"
    );
}

#[test]
fn cyclic_rule_sets_hit_the_run_guard() {
    let limits = ResourceLimits {
        max_run_cycles: 16,
        ..ResourceLimits::default()
    };
    let mut engine = Engine::with_limits(limits);
    engine.put("top spins").unwrap();
    engine.load("$t spins => $t spins.").unwrap();

    assert!(matches!(
        engine.run(),
        Err(TenetError::ResourceLimitExceeded { .. })
    ));
}

#[test]
fn syntax_errors_surface_with_the_offending_region() {
    let mut engine = Engine::new();
    let error = engine
        .load("alice likes apples => ")
        .and(engine.load("broken [[quote"))
        .expect_err("the unterminated quote must fail");

    match error {
        TenetError::Syntax(details) => {
            assert!(details.span.line >= 1);
            assert!(!details.source_text.is_empty());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}
