//! Puzzle Fit authoring CLI
//!
//! Usage:
//!   puzzle-fit [OPTIONS] [FILE]
//!
//! Checks a puzzle document before it ships: referential integrity against
//! the built-in shape library, and optionally a replay of the authored
//! layout through the validator (`--evaluate`) — a correct puzzle's own
//! solution must satisfy its constraint graph.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use puzzle_fit::{check_integrity, evaluate_authored, GridArrangement, ShapeLibrary};

#[derive(Parser)]
#[command(name = "puzzle-fit")]
#[command(about = "Validate puzzle documents for camera-based puzzle games")]
struct Cli {
    /// Puzzle file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Replay the authored layout through the validator and print the
    /// result report
    #[arg(short, long)]
    evaluate: bool,

    /// Only print problems, no summary for clean puzzles
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return ExitCode::SUCCESS;
    }

    let source = match read_input(&cli.input) {
        Ok(content) => content,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let arrangement = match GridArrangement::from_toml_str(&source) {
        Ok(arrangement) => arrangement,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let name = arrangement.name.clone().unwrap_or_else(|| "puzzle".to_string());
    let library = ShapeLibrary::tangram();
    let issues = check_integrity(&arrangement, &library);
    if !issues.is_empty() {
        eprintln!("{}: {} integrity issue(s)", name, issues.len());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        return ExitCode::FAILURE;
    }
    if !cli.quiet {
        println!("{}: integrity ok ({} pieces, {} constraints)",
            name,
            arrangement.elements.len(),
            arrangement.constraints.len(),
        );
    }

    if cli.evaluate {
        let result = evaluate_authored(&arrangement);
        print!("{}", result.report(Some(&name)));
        if !result.passed {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn read_input(input: &Option<PathBuf>) -> Result<String, String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("error reading file '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("error reading from stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn print_intro() {
    println!(
        r#"Puzzle Fit - win-condition validator for puzzle documents

USAGE:
    puzzle-fit [OPTIONS] [FILE]
    cat puzzle.toml | puzzle-fit

OPTIONS:
    -e, --evaluate    Replay the authored layout through the validator
    -q, --quiet       Only print problems
    -h, --help        Print help

The input is a puzzle document in TOML format: a piece list, a pairwise
constraint graph, and validation metadata. Integrity checking resolves
every reference against the built-in tangram shape library; --evaluate
additionally confirms the authored layout satisfies its own constraints."#
    );
}
