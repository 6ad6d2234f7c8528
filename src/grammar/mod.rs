/*
    This module is for storing and manipulating grammars
*/

mod validate;

use std::fmt::{self, Display};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

pub use validate::{check_rule, check_vocabularies, is_valid, validate, ValidationError, ValidationErrors};

/// The textual marker for an empty right-hand side.
pub const EPSILON: &str = "epsilon";

// The base unit in a grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    pub fn name(self) -> char {
        match self {
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => c,
        }
    }

    pub fn nonterminal(self) -> Option<char> {
        match self {
            Symbol::Nonterminal(c) => Some(c),
            Symbol::Terminal(_) => None,
        }
    }
}

/// The symbols in a single alternative. An empty production is epsilon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Production(symbols)
    }

    pub fn epsilon() -> Self {
        Production(Vec::new())
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// The target of a unit production `A -> B`.
    pub fn unit_target(&self) -> Option<char> {
        match self.0.as_slice() {
            [symbol] => symbol.nonterminal(),
            _ => None,
        }
    }

    /// Either a single terminal or exactly two nonterminals.
    pub fn is_canonical(&self) -> bool {
        match self.0.as_slice() {
            [Symbol::Terminal(_)] => true,
            [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => true,
            _ => false,
        }
    }

    pub fn split_at(&self, mid: usize) -> (Production, Production) {
        let (left, right) = self.0.split_at(mid);
        (Production(left.to_vec()), Production(right.to_vec()))
    }

    /// A copy with the symbol at `index` deleted.
    pub fn without(&self, index: usize) -> Production {
        let mut symbols = self.0.clone();
        symbols.remove(index);
        Production(symbols)
    }
}

impl FromIterator<Symbol> for Production {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Production(iter.into_iter().collect())
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_epsilon() {
            return write!(f, "{}", EPSILON);
        }
        write!(f, "{}", self.0.iter().map(|symbol| symbol.name()).collect::<String>())
    }
}

pub type Vocabulary = IndexSet<char>;

// The alternatives of every nonterminal, in declaration order
pub type Productions = IndexMap<char, Vec<Production>>;

// Productions the way they are written down, before symbols are tagged
pub type RawProductions = IndexMap<char, Vec<String>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub start_symbol: char,
    pub nonterminals: Vocabulary,
    pub terminals: Vocabulary,
    pub rules: Productions,
}

impl Grammar {
    /// Builds a grammar from its textual parts, rejecting it as a whole if
    /// any part is inconsistent.
    pub fn new(
        rules: &RawProductions,
        nonterminals: Vocabulary,
        terminals: Vocabulary,
        start_symbol: char,
    ) -> Result<Grammar, ValidationErrors> {
        let mut errors = validate::check_vocabularies(&nonterminals, &terminals, start_symbol);
        if let Err(rule_errors) = validate(rules, &nonterminals, &terminals) {
            errors.extend(rule_errors);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Grammar::from_checked_parts(rules, nonterminals, terminals, start_symbol))
    }

    // Tags every symbol by vocabulary membership; the parts must already be valid
    fn from_checked_parts(
        rules: &RawProductions,
        nonterminals: Vocabulary,
        terminals: Vocabulary,
        start_symbol: char,
    ) -> Grammar {
        let rules = rules
            .iter()
            .map(|(&nonterminal, alternatives)| {
                let alternatives = alternatives
                    .iter()
                    .map(|alternative| tag_alternative(alternative, &nonterminals))
                    .collect_vec();
                (nonterminal, alternatives)
            })
            .collect();

        Grammar {
            start_symbol,
            nonterminals,
            terminals,
            rules,
        }
    }

    /// The production map in its textual form.
    pub fn raw_rules(&self) -> RawProductions {
        self.rules
            .iter()
            .map(|(&nonterminal, alternatives)| {
                (nonterminal, alternatives.iter().map(Production::to_string).collect())
            })
            .collect()
    }
}

fn tag_alternative(alternative: &str, nonterminals: &Vocabulary) -> Production {
    if alternative == EPSILON {
        return Production::epsilon();
    }
    alternative
        .chars()
        .map(|c| if nonterminals.contains(&c) {
            Symbol::Nonterminal(c)
        } else {
            Symbol::Terminal(c)
        })
        .collect()
}

impl Default for Grammar {
    /// The textbook grammar the tool converts when no file is given.
    fn default() -> Self {
        let rules: RawProductions = [
            ('S', vec!["bA", "B"]),
            ('A', vec!["a", "aS", "bAaAb"]),
            ('B', vec!["AC", "bS", "aAa"]),
            ('C', vec![EPSILON, "AB"]),
            ('E', vec!["BA"]),
        ]
        .into_iter()
        .map(|(nonterminal, alternatives)| {
            (nonterminal, alternatives.into_iter().map(str::to_string).collect())
        })
        .collect();

        Grammar::from_checked_parts(
            &rules,
            "SABCE".chars().collect(),
            "ab".chars().collect(),
            'S',
        )
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (nonterminal, alternatives) in &self.rules {
            writeln!(f, "{} -> {}", nonterminal, alternatives.iter().join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(rules: &[(char, &[&str])]) -> RawProductions {
        rules
            .iter()
            .map(|(nonterminal, alternatives)| {
                (*nonterminal, alternatives.iter().map(|a| a.to_string()).collect())
            })
            .collect()
    }

    // Builds a grammar whose start symbol is the first listed nonterminal
    pub(crate) fn grammar(rules: &[(char, &[&str])], nonterminals: &str, terminals: &str) -> Grammar {
        let nonterminals: Vocabulary = nonterminals.chars().collect();
        let start = nonterminals[0];
        Grammar::new(&raw(rules), nonterminals, terminals.chars().collect(), start).unwrap()
    }

    #[test]
    fn tag_symbols_by_vocabulary() {
        let g = grammar(&[('S', &["aSb", "epsilon"])], "S", "ab");
        assert_eq!(g.rules[&'S'], vec![
            Production::new(vec![
                Symbol::Terminal('a'),
                Symbol::Nonterminal('S'),
                Symbol::Terminal('b'),
            ]),
            Production::epsilon(),
        ]);
    }

    #[test]
    fn production_shapes() {
        let g = grammar(&[('S', &["a", "AB", "A", "aB", "ABC"]), ('A', &["a"]), ('B', &["b"]), ('C', &["c"])], "SABC", "abc");
        let canonical = g.rules[&'S'].iter().map(Production::is_canonical).collect_vec();
        assert_eq!(canonical, vec![true, true, false, false, false]);
        assert_eq!(g.rules[&'S'][2].unit_target(), Some('A'));
        assert_eq!(g.rules[&'S'][0].unit_target(), None);
        assert_eq!(g.rules[&'S'][4].without(1).to_string(), "AC");
        let (left, right) = g.rules[&'S'][4].split_at(1);
        assert_eq!((left.to_string(), right.to_string()), ("A".to_string(), "BC".to_string()));
    }

    #[test]
    fn reject_whole_grammar() {
        let result = Grammar::new(
            &raw(&[('S', &["aX"]), ('T', &["a"])]),
            "S".chars().collect(),
            "a".chars().collect(),
            'S',
        );
        assert_eq!(result.unwrap_err(), vec![
            ValidationError::UndeclaredSymbol { nonterminal: 'S', symbol: 'X' },
            ValidationError::UndeclaredNonterminal('T'),
        ]);
    }

    #[test]
    fn reject_inconsistent_vocabularies() {
        let result = Grammar::new(
            &raw(&[('S', &["a"])]),
            "Sa".chars().collect(),
            "a".chars().collect(),
            'Z',
        );
        assert_eq!(result.unwrap_err(), vec![
            ValidationError::SharedSymbol('a'),
            ValidationError::UndeclaredStart('Z'),
        ]);
    }

    #[test]
    fn default_grammar_is_valid() {
        let g = Grammar::default();
        assert!(is_valid(&g.raw_rules(), &g.nonterminals, &g.terminals));
        assert_eq!(g.raw_rules()[&'C'], vec!["epsilon".to_string(), "AB".to_string()]);
    }

    #[test]
    fn display_grammar() {
        let g = grammar(&[('S', &["aS", "epsilon"]), ('A', &["a"])], "SA", "a");
        assert_eq!(g.to_string(), "S -> aS | epsilon\nA -> a\n");
    }
}
