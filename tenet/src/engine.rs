//! Forward chaining and the engine facade
//!
//! One cycle (`tick`) walks the program in declaration order: ground
//! items are (re-)inserted into working memory, and the first rule whose
//! predicate selects is fired, ending the cycle. Firing grounds the
//! result facts under the selection's bindings and declares them.
//! `run` repeats cycles until one fires nothing, which is the fixpoint.

use crate::ast::SymbolGenerator;
use crate::environment::Environment;
use crate::error::TenetError;
use crate::parser::{parse_facts, parse_script};
use crate::resource_limits::ResourceLimits;
use crate::semantic::{Bindings, Production, Program, ProgramItem};
use crate::unify::simplify;
use crate::TenetResult;
use std::time::Instant;

/// One successful rule firing: the production that fired and the
/// bindings it fired under, gensym allocations included.
#[derive(Debug, Clone)]
pub struct Firing {
    pub production: Production,
    pub bindings: Bindings,
}

/// The tenet engine: a loaded program, its working memory, the symbol
/// generator, and the resource limits guarding `run`.
///
/// Single-threaded and synchronous; every operation runs to completion.
/// Embedders driving one environment from several threads must serialize
/// access themselves.
pub struct Engine {
    environment: Environment,
    program: Program,
    symbols: SymbolGenerator,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            environment: Environment::new(),
            program: Program::default(),
            symbols: SymbolGenerator::new(),
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Replace the symbol generator, pinning the gensym sequence
    pub fn with_symbols(mut self, symbols: SymbolGenerator) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Parse a script with this engine's symbol generator and limits,
    /// without loading it.
    pub fn parse(&mut self, code: &str) -> TenetResult<Program> {
        parse_script(code, &mut self.symbols, &self.limits)
    }

    /// Parse a script and append its items to the loaded program
    pub fn load(&mut self, code: &str) -> TenetResult<()> {
        let program = parse_script(code, &mut self.symbols, &self.limits)?;
        self.program.items.extend(program.items);
        Ok(())
    }

    /// Declare facts from source text straight into working memory.
    ///
    /// The whole batch shares one set of bindings, so `$x a, $x b` puts
    /// the same fresh symbol into both facts.
    pub fn put(&mut self, facts_text: &str) -> TenetResult<()> {
        let facts = parse_facts(facts_text)?;
        Self::ensure_capacity(&self.limits, self.environment.len() + facts.len())?;
        let mut bindings = Bindings::new();
        self.environment
            .declare(&facts, &mut bindings, &mut self.symbols)
    }

    /// Select a predicate given as source text, retracting the matched
    /// facts on success.
    pub fn select(&mut self, predicate_text: &str) -> TenetResult<Option<Bindings>> {
        let predicate = parse_facts(predicate_text)?;
        self.environment.select(&predicate)
    }

    /// Select a predicate and, on success, declare whatever facts the
    /// callback produces under the selection's bindings.
    pub fn match_first<F>(&mut self, predicate_text: &str, on_match: F) -> TenetResult<bool>
    where
        F: FnOnce(&Bindings) -> Option<String>,
    {
        let predicate = parse_facts(predicate_text)?;
        match self.environment.select(&predicate)? {
            Some(mut bindings) => {
                if let Some(facts_text) = on_match(&bindings) {
                    self.declare_from(&facts_text, &mut bindings)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Repeatedly select the predicate until it stops matching, invoking
    /// the callback for every selection. Reports whether any matched.
    ///
    /// A callback that re-declares facts matching the predicate keeps the
    /// loop alive; bounding that is the caller's concern.
    pub fn match_all<F>(&mut self, predicate_text: &str, mut on_match: F) -> TenetResult<bool>
    where
        F: FnMut(&Bindings) -> Option<String>,
    {
        let predicate = parse_facts(predicate_text)?;
        let mut matched = false;
        while let Some(mut bindings) = self.environment.select(&predicate)? {
            matched = true;
            if let Some(facts_text) = on_match(&bindings) {
                self.declare_from(&facts_text, &mut bindings)?;
            }
        }
        Ok(matched)
    }

    /// Run one cycle against the loaded program. Reports whether a rule
    /// fired.
    pub fn tick(&mut self) -> TenetResult<bool> {
        Ok(self.tick_trace()?.is_some())
    }

    /// Run one cycle against the loaded program, returning the firing
    /// for trace display when a rule fired.
    pub fn tick_trace(&mut self) -> TenetResult<Option<Firing>> {
        Self::cycle(
            &mut self.environment,
            &mut self.symbols,
            &self.limits,
            &self.program,
        )
    }

    /// Run one cycle against a transient program (a one-shot script),
    /// mutating this engine's working memory.
    pub fn tick_script(&mut self, program: &Program) -> TenetResult<Option<Firing>> {
        Self::cycle(&mut self.environment, &mut self.symbols, &self.limits, program)
    }

    /// Cycle until no rule fires. Reports whether at least one firing
    /// occurred across the whole run.
    ///
    /// An unbounded or cyclic rule set is cut off by `max_run_cycles` /
    /// `max_evaluation_time_ms` with a [`TenetError::ResourceLimitExceeded`].
    pub fn run(&mut self) -> TenetResult<bool> {
        let started = Instant::now();
        let mut fired = false;
        let mut cycles: u64 = 0;

        while self.tick()? {
            fired = true;
            cycles += 1;
            if cycles >= self.limits.max_run_cycles {
                return Err(TenetError::ResourceLimitExceeded {
                    limit_name: "max_run_cycles".to_string(),
                    limit_value: self.limits.max_run_cycles.to_string(),
                    actual_value: cycles.to_string(),
                    suggestion: "The rule set may not reach a fixpoint; revise the rules or raise the limit"
                        .to_string(),
                });
            }
            let elapsed = started.elapsed().as_millis() as u64;
            if elapsed > self.limits.max_evaluation_time_ms {
                return Err(TenetError::ResourceLimitExceeded {
                    limit_name: "max_evaluation_time_ms".to_string(),
                    limit_value: self.limits.max_evaluation_time_ms.to_string(),
                    actual_value: elapsed.to_string(),
                    suggestion: "The rule set may not reach a fixpoint; revise the rules or raise the limit"
                        .to_string(),
                });
            }
        }

        Ok(fired)
    }

    /// Forget the working memory and the loaded program
    pub fn clear(&mut self) {
        self.environment.clear();
        self.program = Program::default();
    }

    /// The facts currently in working memory, rendered, in canonical
    /// order
    pub fn facts(&self) -> Vec<String> {
        self.environment.iter().map(|fact| fact.to_string()).collect()
    }

    /// The loaded program, rendered item by item in declaration order
    pub fn rules(&self) -> Vec<String> {
        self.program.items.iter().map(|item| item.to_string()).collect()
    }

    fn declare_from(&mut self, facts_text: &str, bindings: &mut Bindings) -> TenetResult<()> {
        let facts = parse_facts(facts_text)?;
        Self::ensure_capacity(&self.limits, self.environment.len() + facts.len())?;
        self.environment.declare(&facts, bindings, &mut self.symbols)
    }

    /// One scan over the program: insert ground items, fire the first
    /// selectable rule, stop.
    ///
    /// The result facts are grounded *before* the consumed premises are
    /// retracted or anything is inserted, so an evaluation failure in the
    /// result leaves working memory exactly as it was.
    fn cycle(
        environment: &mut Environment,
        symbols: &mut SymbolGenerator,
        limits: &ResourceLimits,
        program: &Program,
    ) -> TenetResult<Option<Firing>> {
        for item in &program.items {
            match item {
                ProgramItem::Fact(fact) => {
                    if !environment.contains(fact) {
                        Self::ensure_capacity(limits, environment.len() + 1)?;
                        environment.insert(fact.clone());
                    }
                }
                ProgramItem::Production(production) => {
                    let Some(selection) = environment.solve(&production.predicate)? else {
                        continue;
                    };

                    let mut bindings = selection.bindings;
                    let mut grounded = Vec::with_capacity(production.result.len());
                    for fact in &production.result {
                        grounded.push(simplify(fact, &mut bindings, symbols)?);
                    }

                    Self::ensure_capacity(
                        limits,
                        environment.len() - selection.consumed.len() + grounded.len(),
                    )?;
                    for key in &selection.consumed {
                        environment.remove(key);
                    }
                    for fact in grounded {
                        environment.insert(fact);
                    }

                    return Ok(Some(Firing {
                        production: production.clone(),
                        bindings,
                    }));
                }
            }
        }
        Ok(None)
    }

    fn ensure_capacity(limits: &ResourceLimits, projected: usize) -> TenetResult<()> {
        if projected > limits.max_environment_facts {
            return Err(TenetError::ResourceLimitExceeded {
                limit_name: "max_environment_facts".to_string(),
                limit_value: limits.max_environment_facts.to_string(),
                actual_value: projected.to_string(),
                suggestion: "Retract facts or raise the limit".to_string(),
            });
        }
        Ok(())
    }
}
