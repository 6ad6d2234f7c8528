use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;

use crate::grammar::{Grammar, Production, Symbol};

fn derives_terminals(production: &Production, productive: &IndexSet<char>) -> bool {
    production.symbols().iter().all(|&symbol| match symbol {
        Symbol::Terminal(_) => true,
        Symbol::Nonterminal(nonterminal) => productive.contains(&nonterminal),
    })
}

/// The nonterminals that derive some terminal string, as a least fixed point
/// seeded with the nonterminals that have a single-terminal production.
pub fn productive_nonterminals(grammar: &Grammar) -> IndexSet<char> {
    let mut productive: IndexSet<char> = grammar.rules.iter()
        .filter(|(_, alternatives)| alternatives.iter().any(|alternative| {
            matches!(alternative.symbols(), [Symbol::Terminal(_)])
        }))
        .map(|(&nonterminal, _)| nonterminal)
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (&nonterminal, alternatives) in &grammar.rules {
            if productive.contains(&nonterminal) {
                continue;
            }
            if alternatives.iter().any(|alternative| derives_terminals(alternative, &productive)) {
                productive.insert(nonterminal);
                changed = true;
            }
        }
    }

    productive
}

/// Removes nonterminals that derive no terminal string, together with every
/// production that mentions one.
pub fn remove_unproductive(grammar: &Grammar) -> Grammar {
    let productive = productive_nonterminals(grammar);
    debug!("productive nonterminals: {{{}}}", productive.iter().join(", "));

    let rules = grammar.rules.iter()
        .filter(|(nonterminal, _)| productive.contains(*nonterminal))
        .map(|(&nonterminal, alternatives)| {
            let alternatives = alternatives.iter()
                .filter(|alternative| derives_terminals(alternative, &productive))
                .cloned()
                .collect_vec();
            (nonterminal, alternatives)
        })
        .collect();

    let nonterminals = grammar.nonterminals.iter()
        .filter(|nonterminal| productive.contains(*nonterminal))
        .copied()
        .collect();

    Grammar {
        rules,
        nonterminals,
        ..grammar.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::{grammar, raw};

    #[test]
    fn fixed_point_through_chains() {
        let g = grammar(&[
            ('S', &["AB"]),
            ('A', &["aB"]),
            ('B', &["b"]),
            ('L', &["aL"]),
        ], "SABL", "ab");
        let productive = productive_nonterminals(&g);
        assert_eq!(productive.iter().copied().sorted().collect::<String>(), "ABS");
    }

    #[test]
    fn remove_unproductive_symbols_and_productions() {
        let g = grammar(&[
            ('S', &["aS", "aL", "b"]),
            ('L', &["aL", "LL"]),
            ('A', &["LS", "a"]),
        ], "SLA", "ab");
        let result = remove_unproductive(&g);
        assert_eq!(result.raw_rules(), raw(&[
            ('S', &["aS", "b"]),
            ('A', &["a"]),
        ]));
        assert!(!result.nonterminals.contains(&'L'));
    }

    #[test]
    fn dangling_references_are_unproductive() {
        // `N` is declared but lost its rule in an earlier pass
        let g = grammar(&[('S', &["aN", "b"])], "SN", "ab");
        assert_eq!(remove_unproductive(&g).raw_rules(), raw(&[('S', &["b"])]));
    }

    #[test]
    fn idempotent() {
        let g = grammar(&[
            ('S', &["AB", "aC"]),
            ('A', &["a", "aA"]),
            ('B', &["bB"]),
            ('C', &["c", "BC"]),
        ], "SABC", "abc");
        let once = remove_unproductive(&g);
        let twice = remove_unproductive(&once);
        assert_eq!(once, twice);
        assert_eq!(productive_nonterminals(&once).len(), once.rules.len());
    }
}
