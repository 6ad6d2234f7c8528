use indexmap::IndexMap;

use crate::grammar::{check_rule, check_vocabularies, ValidationError, Vocabulary};
use super::CompileErrorType::Invalid;
use super::{CompileError, CompileErrors, FileResult, Location};

pub type IntermediateRuleset = IndexMap<char, (Vec<String>, Location)>;

// The vocabularies as declared, with the line each one came from
pub struct Declarations {
    pub nonterminals: (Vocabulary, Location),
    pub terminals: (Vocabulary, Location),
    pub start: (char, Location),
}

fn located(location: &Location) -> impl Fn(ValidationError) -> CompileError + '_ {
    move |error| CompileError {
        location: location.to_owned(),
        error: Invalid(error)
    }
}

fn get_declaration_errors(declarations: &Declarations) -> CompileErrors {
    let (nonterminals, nonterminals_location) = &declarations.nonterminals;
    let (terminals, _) = &declarations.terminals;
    let (start, start_location) = &declarations.start;

    // Shared symbols are reported where the nonterminals are declared and a
    // bad start symbol where the start symbol is
    check_vocabularies(nonterminals, terminals, *start)
        .into_iter()
        .map(|error| match error {
            ValidationError::UndeclaredStart(_) => located(start_location)(error),
            _ => located(nonterminals_location)(error),
        })
        .collect()
}

fn get_rule_errors(rules: &IntermediateRuleset, declarations: &Declarations) -> CompileErrors {
    // Check every rule on its own and tag the problems with the rule's line
    rules.iter()
        .flat_map(|(&symbol, (alternatives, location))| {
            check_rule(symbol, alternatives, &declarations.nonterminals.0, &declarations.terminals.0)
                .into_iter()
                .map(located(location))
        })
        .collect()
}

pub fn verify_rules(rules: &IntermediateRuleset, declarations: &Declarations) -> FileResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_declaration_errors(declarations).into_iter());
    errors.extend(get_rule_errors(rules, declarations).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
