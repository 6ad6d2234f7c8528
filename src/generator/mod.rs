/*
    This module generates sample sentences from a grammar
*/

use rand::prelude::*;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

/// How deep a derivation may nest before generation gives up.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // A nonterminal without productions was used
    UndefinedNonterminal(char),
    // The derivation nested deeper than allowed
    TooDeep(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No productions for nonterminal `{}`", nonterminal),
            GenerateErrorType::TooDeep(depth) => write!(f, "Derivation nested deeper than {} levels", depth),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// What a single derivation needs to carry around
struct Derivation<'a, R: Rng + ?Sized> {
    rules: &'a Productions,
    rng: &'a mut R,
    max_depth: usize,
    location: &'a Location,
}

/// Derives a random sentence from the start symbol of the grammar.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize, location: &Location) -> GenResult {
    generate_with_override(grammar, grammar.start_symbol, rng, max_depth, location)
}

// Derives a random sentence starting with the given nonterminal
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: char, rng: &mut R, max_depth: usize, location: &Location) -> GenResult {
    let mut derivation = Derivation {
        rules: &grammar.rules,
        rng,
        max_depth,
        location,
    };
    derivation.nonterminal(start, 0)
}

impl<'a, R: Rng + ?Sized> Derivation<'a, R> {
    fn error(&self, error: GenerateErrorType) -> GenerateError {
        GenerateError {
            location: self.location.clone(),
            error
        }
    }

    fn nonterminal(&mut self, nonterminal: char, depth: usize) -> GenResult {
        if depth > self.max_depth {
            return Err(self.error(GenerateErrorType::TooDeep(self.max_depth)));
        }

        let rules = self.rules;
        let alternative = rules
            .get(&nonterminal)
            .and_then(|alternatives| alternatives.choose(&mut *self.rng))
            .ok_or_else(|| self.error(GenerateErrorType::UndefinedNonterminal(nonterminal)))?;

        let mut result = String::new();
        for &symbol in alternative.symbols() {
            match symbol {
                Symbol::Nonterminal(name) => result.push_str(&self.nonterminal(name, depth + 1)?),
                Symbol::Terminal(name) => result.push(name),
            }
        }

        return Ok(result);
    }
}
