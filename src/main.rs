//! Bondwar - Entry Point
//!
//! Reads commands from stdin, one per line, and applies them to the game.
//! With a state file the game is restored on start and saved after every
//! command.

use bondwar::command::CommandEngine;
use bondwar::core::config::GameConfig;
use clap::Parser;

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Bondwar - economy and war between players, with undo
#[derive(Parser, Debug)]
#[command(name = "bondwar")]
#[command(about = "Play bondwar from the terminal, one command per line")]
struct Args {
    /// Game configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exported game to restore on start and rewrite after every command
    #[arg(long)]
    state: Option<PathBuf>,

    /// Do not print the prompt
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bondwar=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let state_file = args
        .state
        .clone()
        .or_else(|| config.state_file.as_ref().map(PathBuf::from));

    let mut engine = match &state_file {
        Some(path) if path.exists() => {
            let saved = fs::read_to_string(path)?;
            let engine = CommandEngine::restore(&config, saved.lines())?;
            tracing::info!("Loaded game from {}", path.display());
            engine
        }
        _ => CommandEngine::new(&config),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if !args.quiet {
            print!("> ");
            stdout.flush()?;
        }

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "quit" | "q" => break,
            "help" => {
                for line in engine.help() {
                    println!("  {}", line);
                }
            }
            "print" => {
                for line in engine.export_state() {
                    println!("{}", line);
                }
            }
            _ => {
                let outcome = engine.apply_line(input);
                println!("{}", outcome.message);
                if let Some(path) = &state_file {
                    engine.save(path)?;
                }
            }
        }
    }

    Ok(())
}
