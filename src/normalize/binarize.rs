use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace, warn};

use crate::grammar::{Grammar, Production, Productions, Symbol, Vocabulary};
use super::NormalizeError;

// Hands out single-letter nonterminal names nobody uses yet, in alphabetical order
struct FreshNames {
    taken: Vocabulary,
    next: char,
}

impl FreshNames {
    fn new(grammar: &Grammar) -> Self {
        let taken = grammar.nonterminals.iter()
            .chain(grammar.rules.keys())
            .chain(grammar.terminals.iter())
            .copied()
            .collect();
        FreshNames { taken, next: 'A' }
    }

    fn mint(&mut self, substring: &Production) -> Result<char, NormalizeError> {
        while self.next <= 'Z' {
            let candidate = self.next;
            self.next = char::from(self.next as u8 + 1);
            if self.taken.insert(candidate) {
                trace!("minted `{}` for `{}`", candidate, substring);
                return Ok(candidate);
            }
        }
        Err(NormalizeError::ExhaustedNameSpace(substring.clone()))
    }
}

// Auxiliary nonterminals keyed by the substring they stand for, in minting order
struct Auxiliaries {
    names: FreshNames,
    minted: IndexMap<Production, char>,
}

impl Auxiliaries {
    fn name_for(&mut self, substring: Production) -> Result<char, NormalizeError> {
        if let Some(&name) = self.minted.get(&substring) {
            return Ok(name);
        }
        let name = self.names.mint(&substring)?;
        self.minted.insert(substring, name);
        Ok(name)
    }

    fn rewrite(&mut self, production: &Production) -> Result<Production, NormalizeError> {
        let (left, right) = production.split_at(production.len() / 2);
        let left = self.name_for(left)?;
        let right = self.name_for(right)?;
        Ok(Production::new(vec![Symbol::Nonterminal(left), Symbol::Nonterminal(right)]))
    }
}

/// Rewrites every production that is neither a single terminal nor a pair of
/// nonterminals into a pair of auxiliary nonterminals, one per half.
///
/// Auxiliaries are shared between equal halves and get one production each,
/// the half itself. Halves longer than two symbols are not split again.
pub fn binarize(grammar: &Grammar) -> Result<Grammar, NormalizeError> {
    let mut auxiliaries = Auxiliaries {
        names: FreshNames::new(grammar),
        minted: IndexMap::new(),
    };

    let mut rules = Productions::with_capacity(grammar.rules.len());
    for (&nonterminal, alternatives) in &grammar.rules {
        let alternatives = alternatives.iter()
            .map(|alternative| {
                if alternative.is_canonical() {
                    Ok(alternative.clone())
                } else if alternative.len() < 2 {
                    warn!("cannot split `{} -> {}` into two halves, leaving it as is", nonterminal, alternative);
                    Ok(alternative.clone())
                } else {
                    auxiliaries.rewrite(alternative)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        rules.insert(nonterminal, alternatives);
    }

    debug!("auxiliary nonterminals: {{{}}}", auxiliaries.minted.iter()
        .map(|(substring, name)| format!("{} = {}", name, substring))
        .join(", "));

    let mut nonterminals = grammar.nonterminals.clone();
    for (substring, name) in auxiliaries.minted {
        nonterminals.insert(name);
        rules.insert(name, vec![substring]);
    }

    Ok(Grammar {
        rules,
        nonterminals,
        ..grammar.clone()
    })
}
