use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;

use crate::grammar::{Grammar, Production, Productions, Symbol};

/// Nonterminals with a literal epsilon production.
pub fn nullable_nonterminals(grammar: &Grammar) -> IndexSet<char> {
    grammar.rules.iter()
        .filter(|(_, alternatives)| alternatives.iter().any(Production::is_epsilon))
        .map(|(&nonterminal, _)| nonterminal)
        .collect()
}

/// Removes epsilon productions, adding for each occurrence of a nullable
/// nonterminal a variant with that single occurrence deleted.
///
/// Only direct nullability is considered, and occurrences are deleted one at a
/// time, so a production with several nullable occurrences does not get every
/// combination.
pub fn eliminate_epsilon(grammar: &Grammar) -> Grammar {
    let nullable = nullable_nonterminals(grammar);
    debug!("nullable nonterminals: {{{}}}", nullable.iter().join(", "));

    let mut rules = Productions::with_capacity(grammar.rules.len());
    for (&nonterminal, alternatives) in &grammar.rules {
        let mut expanded = alternatives.clone();
        for &null in &nullable {
            // Variants added for an earlier nullable symbol are visited too
            let count = expanded.len();
            for index in 0..count {
                let variants = expanded[index].symbols().iter()
                    .positions(|&symbol| symbol == Symbol::Nonterminal(null))
                    .map(|position| expanded[index].without(position))
                    .filter(|variant| !variant.is_epsilon())
                    .collect_vec();
                expanded.extend(variants);
            }
        }

        if nullable.contains(&nonterminal) && expanded.len() < 2 {
            debug!("dropping `{}`, it only derives epsilon", nonterminal);
            continue;
        }

        expanded.retain(|alternative| !alternative.is_epsilon());
        rules.insert(nonterminal, expanded);
    }

    Grammar {
        rules,
        ..grammar.clone()
    }
}
