use indexmap::IndexSet;
use log::{debug, trace};

use crate::grammar::Grammar;

/// Replaces every unit production `A -> B` with the productions of `B`.
///
/// Nonterminals are rewritten in order, and a unit production borrows the
/// productions its target has at that moment. Productions brought in this way
/// are scanned as well, but every target is expanded at most once per
/// nonterminal, so cycles of unit productions simply disappear.
pub fn eliminate_unit_productions(grammar: &Grammar) -> Grammar {
    let mut rules = grammar.rules.clone();

    for index in 0..rules.len() {
        let Some((&nonterminal, alternatives)) = rules.get_index(index) else {
            continue;
        };
        let mut alternatives = alternatives.clone();
        let mut expanded = IndexSet::from([nonterminal]);

        let mut position = 0;
        while position < alternatives.len() {
            let Some(target) = alternatives[position].unit_target() else {
                position += 1;
                continue;
            };

            alternatives.remove(position);
            if !expanded.insert(target) {
                trace!("dropping repeated unit production {} -> {}", nonterminal, target);
                continue;
            }
            match rules.get(&target) {
                Some(replacements) => alternatives.extend(replacements.iter().cloned()),
                None => debug!("dropping {} -> {}, `{}` has no productions", nonterminal, target, target),
            }
        }

        rules[index] = alternatives;
    }

    Grammar {
        rules,
        ..grammar.clone()
    }
}
