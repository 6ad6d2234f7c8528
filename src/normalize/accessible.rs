use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, warn};

use crate::grammar::{Grammar, Symbol};

/// Declared nonterminals that appear on no right-hand side at all.
///
/// This is not reachability from the start symbol: a nonterminal only
/// referenced by itself or by another unreachable rule still counts as used.
pub fn inaccessible_nonterminals(grammar: &Grammar) -> Vec<char> {
    let referenced: HashSet<char> = grammar.rules.values()
        .flatten()
        .flat_map(|production| production.symbols())
        .filter_map(|&symbol| Symbol::nonterminal(symbol))
        .collect();

    grammar.nonterminals.iter()
        .filter(|nonterminal| !referenced.contains(nonterminal))
        .copied()
        .collect()
}

pub fn remove_inaccessible(grammar: &Grammar) -> Grammar {
    let inaccessible = inaccessible_nonterminals(grammar);
    debug!("inaccessible nonterminals: {{{}}}", inaccessible.iter().join(", "));

    let mut result = grammar.clone();
    for nonterminal in &inaccessible {
        if *nonterminal == grammar.start_symbol {
            warn!("start symbol `{}` is never referenced and is removed", nonterminal);
        }
        result.rules.shift_remove(nonterminal);
        result.nonterminals.shift_remove(nonterminal);
    }
    result
}
