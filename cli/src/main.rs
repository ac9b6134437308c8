mod error_formatter;
mod formatter;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tenet::Engine;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "tenet")]
#[command(about = "A forward-chaining rule engine for tiny declarative fact bases.")]
#[command(
    long_about = "Tenet interprets a small rule language: facts (`alice likes apples.`) and rules\n(`$x likes $y => $x eats $y.`) are matched by unification with backtracking and fired\nto fixpoint. The CLI runs scripts, shows parsed programs, and offers an interactive shell."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a script, chain rules to fixpoint, and print the facts
    ///
    /// Seed facts given after the file land directly in working memory
    /// before the run, so rule-only scripts have something to chew on.
    ///
    /// Examples:
    ///   tenet run eats.tenet
    ///   tenet run eats.tenet "alice likes apples"
    Run {
        /// Script file to load
        file: Option<PathBuf>,
        /// Facts to seed into working memory (fact-list syntax)
        facts: Vec<String>,
        /// Workspace directory whose .tenet files are loaded first
        #[arg(short = 'd', long = "dir")]
        workdir: Option<PathBuf>,
        /// Print the environment as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the parsed facts and rules of a script without running it
    Show {
        /// Script file to parse
        file: Option<PathBuf>,
        /// Workspace directory whose .tenet files are loaded first
        #[arg(short = 'd', long = "dir")]
        workdir: Option<PathBuf>,
    },
    /// Start the interactive shell
    ///
    /// Lines are executed as one-shot scripts against working memory;
    /// comma-commands (,load ,run ,facts ...) drive the loaded program.
    Repl {
        /// Script files to load before the first prompt
        files: Vec<PathBuf>,
        /// Workspace directory whose .tenet files are loaded first
        #[arg(short = 'd', long = "dir")]
        workdir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = execute(cli) {
        eprintln!("{:#}", error);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            file,
            facts,
            workdir,
            json,
        } => run_command(file, facts, workdir, json),
        Commands::Show { file, workdir } => show_command(file, workdir),
        Commands::Repl { files, workdir } => repl_command(files, workdir),
    }
}

fn run_command(
    file: Option<PathBuf>,
    facts: Vec<String>,
    workdir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut engine = Engine::new();
    load_sources(&mut engine, &file, &workdir)?;

    for fact_text in &facts {
        engine
            .put(fact_text)
            .map_err(|error| anyhow::anyhow!(error_formatter::format_error(&error)))?;
    }

    engine
        .run()
        .map_err(|error| anyhow::anyhow!(error_formatter::format_error(&error)))?;

    if json {
        let facts: Vec<_> = engine.environment().iter().collect();
        println!("{}", serde_json::to_string_pretty(&facts)?);
    } else {
        print!("{}", formatter::facts_table(&engine));
    }
    Ok(())
}

fn show_command(file: Option<PathBuf>, workdir: Option<PathBuf>) -> Result<()> {
    let mut engine = Engine::new();
    load_sources(&mut engine, &file, &workdir)?;

    let listing = engine.rules();
    if listing.is_empty() {
        println!("( empty program )");
    } else {
        for line in listing {
            println!("{}", line);
        }
    }
    Ok(())
}

fn repl_command(files: Vec<PathBuf>, workdir: Option<PathBuf>) -> Result<()> {
    let mut engine = Engine::new();
    if let Some(dir) = &workdir {
        load_workspace(&mut engine, dir)?;
    }
    for file in &files {
        load_file(&mut engine, file)?;
    }
    repl::run(engine)
}

fn load_sources(
    engine: &mut Engine,
    file: &Option<PathBuf>,
    workdir: &Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = workdir {
        load_workspace(engine, dir)?;
    }
    if let Some(file) = file {
        load_file(engine, file)?;
    }
    Ok(())
}

/// Load every .tenet file under the workspace directory, in path order
fn load_workspace(engine: &mut Engine, dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "tenet")
        {
            load_file(engine, entry.path())?;
        }
    }
    Ok(())
}

fn load_file(engine: &mut Engine, path: &Path) -> Result<()> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    engine
        .load(&code)
        .map_err(|error| anyhow::anyhow!(error_formatter::format_error(&error)))
        .with_context(|| format!("Failed to load {}", path.display()))
}
