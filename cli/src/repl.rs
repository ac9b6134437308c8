//! The interactive shell
//!
//! Plain lines run as one-shot scripts against working memory, printing
//! the firing trace when a rule applies. Comma-commands drive the loaded
//! program; an unambiguous prefix is enough (`,f` for `,facts`).

use crate::error_formatter;
use crate::formatter;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use tenet::Engine;

const COMMANDS: &[(&str, &str)] = &[
    (",load", "load a script file into the program"),
    (",clear", "forget every fact and rule"),
    (",tick", "attempt a single rule firing"),
    (",run", "chain rules until none applies"),
    (",facts", "list working memory"),
    (",rules", "list the loaded program"),
    (",help", "show this list"),
    (",quit", "leave the shell"),
];

pub fn run(mut engine: Engine) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    print_help();

    loop {
        match editor.readline("tenet> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if line.starts_with(',') {
                    if !dispatch(&mut engine, &line) {
                        break;
                    }
                } else {
                    execute_line(&mut engine, &line);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        }
    }

    println!("bye");
    Ok(())
}

/// Resolve a (possibly abbreviated) command and execute it. Returns
/// false when the shell should exit.
fn dispatch(engine: &mut Engine, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        Some(command) => command,
        None => return true,
    };

    let matching: Vec<&str> = COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| name.starts_with(command))
        .collect();

    match matching.as_slice() {
        [] => {
            println!("Unknown command {}; try ,help", command);
            true
        }
        [name] => execute_command(engine, name, parts.next()),
        candidates => {
            let options = candidates.join("\" or \"");
            println!("Ambiguous command, try \"{}\"", options);
            true
        }
    }
}

fn execute_command(engine: &mut Engine, name: &str, argument: Option<&str>) -> bool {
    match name {
        ",load" => match argument {
            Some(path) => match fs::read_to_string(path) {
                Ok(code) => {
                    if let Err(error) = engine.load(&code) {
                        eprintln!("{}", error_formatter::format_error(&error));
                    }
                }
                Err(error) => eprintln!("Failed to read {}: {}", path, error),
            },
            None => println!(",load needs a file name"),
        },
        ",clear" => engine.clear(),
        ",tick" => match engine.tick_trace() {
            Ok(Some(firing)) => print_trace(&firing),
            Ok(None) => {}
            Err(error) => eprintln!("{}", error_formatter::format_error(&error)),
        },
        ",run" => {
            if let Err(error) = engine.run() {
                eprintln!("{}", error_formatter::format_error(&error));
            }
        }
        ",facts" => println!("{}", formatter::facts_listing(engine)),
        ",rules" => println!("{}", formatter::rules_listing(engine)),
        ",help" => print_help(),
        ",quit" => return false,
        _ => println!("Unknown command {}; try ,help", name),
    }
    true
}

/// Run one line as a one-shot script: declarations land in working
/// memory, and the first applicable rule (if any) fires and is traced.
fn execute_line(engine: &mut Engine, line: &str) {
    let script = format!("{}.", line);
    let outcome = match engine.parse(&script) {
        Ok(program) => engine.tick_script(&program),
        Err(error) => Err(error),
    };

    match outcome {
        Ok(Some(firing)) => print_trace(&firing),
        Ok(None) => {}
        Err(error) => eprintln!("{}", error_formatter::format_error(&error)),
    }
}

fn print_trace(firing: &tenet::Firing) {
    match firing.trace_string() {
        Ok(trace) => println!("{}", trace),
        Err(error) => eprintln!("{}", error_formatter::format_error(&error)),
    }
}

fn print_help() {
    let names: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();
    println!("{}", names.join(", "));
}
