mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use chomsky::error_handling::Location;
use chomsky::generator::{self, DEFAULT_MAX_DEPTH};
use chomsky::grammar::{Grammar, ValidationError};
use chomsky::normalize::{run_passes, Pass};
use chomsky::parser;
use clap::Parser;
use log::{info, LevelFilter};
use rand::prelude::*;

const RULE: &str = "------------------------------------------------";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_grammar(cli: &cli::Cli) -> Result<Grammar, ()> {
    let mut grammar = match &cli.file {
        Some(path) => parser::parse_file(path).map_err(|errors| {
            for error in errors {
                eprintln!("{}", error);
            }
        })?,
        None => Grammar::default(),
    };

    if let Some(start) = cli.start {
        if !grammar.nonterminals.contains(&start) {
            eprintln!("{}", ValidationError::UndeclaredStart(start));
            return Err(());
        }
        grammar.start_symbol = start;
    }

    Ok(grammar)
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let Ok(grammar) = load_grammar(&cli) else {
        return ExitCode::FAILURE;
    };
    info!("loaded grammar with {} rules", grammar.rules.len());

    println!("initial grammar:");
    print!("{}", grammar);
    println!("{}", RULE);

    let through = cli.through.map_or(Pass::ALL.len(), usize::from);
    let passes = &Pass::ALL[..through];
    let snapshots = match run_passes(&grammar, passes) {
        Ok(snapshots) => snapshots,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    for (pass, snapshot) in passes.iter().zip(&snapshots) {
        println!("{}. {}:", pass.number(), pass);
        print!("{}", snapshot);
        println!("{}", RULE);
    }

    let samples = cli.samples.unwrap_or(0);
    if samples > 0 {
        let last = snapshots.last().unwrap_or(&grammar);
        let location = Location::file(cli.file.clone().unwrap_or_else(PathBuf::new));
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        println!("sample sentences:");
        for _ in 0..samples {
            match generator::generate(last, &mut rng, DEFAULT_MAX_DEPTH, &location) {
                Ok(sentence) => println!("{}", sentence),
                Err(error) => eprintln!("{}", error),
            }
        }
    }

    ExitCode::SUCCESS
}
