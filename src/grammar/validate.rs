use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use super::{RawProductions, Vocabulary, EPSILON};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // A production map key that is not a declared nonterminal
    UndeclaredNonterminal(char),
    // A right-hand side symbol from neither vocabulary
    UndeclaredSymbol { nonterminal: char, symbol: char },
    // A symbol declared as both a nonterminal and a terminal
    SharedSymbol(char),
    // The start symbol is not a declared nonterminal
    UndeclaredStart(char),
}

impl ErrorType for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UndeclaredNonterminal(nonterminal) => write!(f, "`{}` has productions but is not a declared nonterminal", nonterminal),
            ValidationError::UndeclaredSymbol { nonterminal, symbol } => write!(f, "A production of `{}` uses undeclared symbol `{}`", nonterminal, symbol),
            ValidationError::SharedSymbol(symbol) => write!(f, "`{}` is declared as both a nonterminal and a terminal", symbol),
            ValidationError::UndeclaredStart(symbol) => write!(f, "Start symbol `{}` is not a declared nonterminal", symbol),
        }
    }
}

pub type ValidationErrors = Vec<ValidationError>;

/// Checks one rule of a candidate grammar.
pub fn check_rule(nonterminal: char, alternatives: &[String], nonterminals: &Vocabulary, terminals: &Vocabulary) -> ValidationErrors {
    let mut errors = Vec::new();

    if !nonterminals.contains(&nonterminal) {
        errors.push(ValidationError::UndeclaredNonterminal(nonterminal));
    }

    errors.extend(alternatives.iter()
        .filter(|alternative| alternative.as_str() != EPSILON)
        .flat_map(|alternative| alternative.chars())
        .filter(|symbol| !nonterminals.contains(symbol) && !terminals.contains(symbol))
        .unique()
        .map(|symbol| ValidationError::UndeclaredSymbol { nonterminal, symbol }));

    errors
}

pub fn validate(rules: &RawProductions, nonterminals: &Vocabulary, terminals: &Vocabulary) -> Result<(), ValidationErrors> {
    let errors = rules.iter()
        .flat_map(|(&nonterminal, alternatives)| check_rule(nonterminal, alternatives, nonterminals, terminals))
        .collect_vec();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}

pub fn is_valid(rules: &RawProductions, nonterminals: &Vocabulary, terminals: &Vocabulary) -> bool {
    validate(rules, nonterminals, terminals).is_ok()
}

// Invariants on the vocabularies themselves, independent of the productions
pub fn check_vocabularies(nonterminals: &Vocabulary, terminals: &Vocabulary, start_symbol: char) -> ValidationErrors {
    let mut errors = nonterminals.intersection(terminals)
        .map(|&symbol| ValidationError::SharedSymbol(symbol))
        .collect_vec();

    if !nonterminals.contains(&start_symbol) {
        errors.push(ValidationError::UndeclaredStart(start_symbol));
    }

    errors
}
