use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(version, about = "Converts a context-free grammar to Chomsky normal form")]
pub struct Cli {
    /// File containing the grammar (default: the built-in textbook grammar)
    pub file: Option<PathBuf>,

    /// Start symbol (default: the one declared in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Stop after this step (1-5, default: 5)
    #[arg(short, long, value_name = "STEP", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub through: Option<u8>,

    /// Random sentences to derive from the final grammar (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub samples: Option<u32>,

    /// Seed for the sentence sampler
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log more about each step (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["chomsky", "g.cfg", "-t", "3", "-n", "2", "-vv"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("g.cfg")));
        assert_eq!(cli.through, Some(3));
        assert_eq!(cli.samples, Some(2));
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["chomsky", "-t", "6"]).is_err());
    }
}
