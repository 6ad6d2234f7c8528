/*
    This module converts grammars to Chomsky normal form
*/

mod accessible;
mod binarize;
mod epsilon;
mod productive;
mod unit;

use std::fmt::Display;

use log::info;

use crate::grammar::{Grammar, Production};

pub use accessible::{inaccessible_nonterminals, remove_inaccessible};
pub use binarize::binarize;
pub use epsilon::{eliminate_epsilon, nullable_nonterminals};
pub use productive::{productive_nonterminals, remove_unproductive};
pub use unit::eliminate_unit_productions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    // No single-letter name is left for the auxiliary standing for this substring
    ExhaustedNameSpace(Production),
}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::ExhaustedNameSpace(substring) => write!(f, "Ran out of single-letter nonterminal names for `{}`", substring),
        }
    }
}

impl std::error::Error for NormalizeError {}

/// The steps of the conversion, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Epsilon,
    Unit,
    Inaccessible,
    Unproductive,
    Binarize,
}

impl Pass {
    pub const ALL: [Pass; 5] = [Pass::Epsilon, Pass::Unit, Pass::Inaccessible, Pass::Unproductive, Pass::Binarize];

    /// Position in the pipeline, starting at 1.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn apply(self, grammar: &Grammar) -> Result<Grammar, NormalizeError> {
        Ok(match self {
            Pass::Epsilon => eliminate_epsilon(grammar),
            Pass::Unit => eliminate_unit_productions(grammar),
            Pass::Inaccessible => remove_inaccessible(grammar),
            Pass::Unproductive => remove_unproductive(grammar),
            Pass::Binarize => binarize(grammar)?,
        })
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Epsilon => write!(f, "eliminating epsilon productions"),
            Pass::Unit => write!(f, "eliminating unit productions"),
            Pass::Inaccessible => write!(f, "eliminating inaccessible symbols"),
            Pass::Unproductive => write!(f, "eliminating unproductive symbols"),
            Pass::Binarize => write!(f, "obtaining chomsky normal form"),
        }
    }
}

/// The grammar after each pass of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub epsilon_free: Grammar,
    pub unit_free: Grammar,
    pub accessible: Grammar,
    pub productive: Grammar,
    pub chomsky: Grammar,
}

impl Normalization {
    pub fn stages(&self) -> [(Pass, &Grammar); 5] {
        [
            (Pass::Epsilon, &self.epsilon_free),
            (Pass::Unit, &self.unit_free),
            (Pass::Inaccessible, &self.accessible),
            (Pass::Unproductive, &self.productive),
            (Pass::Binarize, &self.chomsky),
        ]
    }
}

fn apply_logged(pass: Pass, grammar: &Grammar) -> Result<Grammar, NormalizeError> {
    info!("{}. {}", pass.number(), pass);
    pass.apply(grammar)
}

/// Runs all five passes, each on the output of the previous one.
pub fn normalize(grammar: &Grammar) -> Result<Normalization, NormalizeError> {
    let epsilon_free = apply_logged(Pass::Epsilon, grammar)?;
    let unit_free = apply_logged(Pass::Unit, &epsilon_free)?;
    let accessible = apply_logged(Pass::Inaccessible, &unit_free)?;
    let productive = apply_logged(Pass::Unproductive, &accessible)?;
    let chomsky = apply_logged(Pass::Binarize, &productive)?;

    Ok(Normalization {
        epsilon_free,
        unit_free,
        accessible,
        productive,
        chomsky,
    })
}

/// Runs the given passes in order, returning the grammar after each one.
pub fn run_passes(grammar: &Grammar, passes: &[Pass]) -> Result<Vec<Grammar>, NormalizeError> {
    let mut snapshots: Vec<Grammar> = Vec::with_capacity(passes.len());
    for &pass in passes {
        let next = apply_logged(pass, snapshots.last().unwrap_or(grammar))?;
        snapshots.push(next);
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::{grammar, raw};

    const UNIT_FREE: &[(char, &[&str])] = &[
        ('S', &["bA", "AC", "bS", "aAa", "a", "aS", "bAaAb"]),
        ('A', &["a", "aS", "bAaAb"]),
        ('B', &["AC", "bS", "aAa", "a", "aS", "bAaAb"]),
        ('C', &["AB"]),
        ('E', &["BA"]),
    ];

    #[test]
    fn normalize_default_grammar() {
        let result = normalize(&Grammar::default()).unwrap();

        assert_eq!(result.epsilon_free.raw_rules(), raw(&[
            ('S', &["bA", "B"]),
            ('A', &["a", "aS", "bAaAb"]),
            ('B', &["AC", "bS", "aAa", "A"]),
            ('C', &["AB"]),
            ('E', &["BA"]),
        ]));
        assert_eq!(result.unit_free.raw_rules(), raw(UNIT_FREE));
        assert_eq!(result.accessible.raw_rules(), raw(&UNIT_FREE[..4]));
        assert_eq!(result.productive, result.accessible);
        assert_eq!(result.chomsky.raw_rules(), raw(&[
            ('S', &["DE", "AC", "DF", "GH", "a", "GF", "IJ"]),
            ('A', &["a", "GF", "IJ"]),
            ('B', &["AC", "DF", "GH", "a", "GF", "IJ"]),
            ('C', &["AB"]),
            ('D', &["b"]),
            ('E', &["A"]),
            ('F', &["S"]),
            ('G', &["a"]),
            ('H', &["Aa"]),
            ('I', &["bA"]),
            ('J', &["aAb"]),
        ]));
    }

    #[test]
    fn deterministic() {
        let g = Grammar::default();
        assert_eq!(normalize(&g).unwrap(), normalize(&g).unwrap());
    }

    #[test]
    fn run_prefix_of_pipeline() {
        let g = Grammar::default();
        let snapshots = run_passes(&g, &Pass::ALL[..2]).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].raw_rules(), raw(UNIT_FREE));
    }

    #[test]
    fn stages_match_run_passes() {
        let g = Grammar::default();
        let result = normalize(&g).unwrap();
        let snapshots = run_passes(&g, &Pass::ALL).unwrap();
        for ((pass, stage), snapshot) in result.stages().into_iter().zip(&snapshots) {
            assert_eq!(stage, snapshot, "after {}", pass);
        }
        assert_eq!(result.stages().map(|(pass, _)| pass.number()), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn errors_propagate() {
        let g = grammar(&[('S', &["abc", "a"])], "SABCDEFGHIJKLMNOPQRTUVWXYZ", "abc");
        let result = run_passes(&g, &[Pass::Unit, Pass::Binarize]);
        assert!(matches!(result, Err(NormalizeError::ExhaustedNameSpace(_))));
    }
}
