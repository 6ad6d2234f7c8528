use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Colon,
    Word(String)
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '-' | '→' | '|' | ':' | ';')
}

pub fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume the dash
    match line.next() {
        Some('>') => Ok(Token::Arrow),
        _ => Err(CompileErrorType::MalformedArrow),
    }
}

pub fn lex_word(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Word(line.peeking_take_while(|&c| is_word_char(c)).collect()))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '-' {
            tokens.push(lex_arrow(&mut line_chars)?);
        } else if c == '→' {
            line_chars.next();
            tokens.push(Token::Arrow);
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if c == ':' {
            line_chars.next();
            tokens.push(Token::Colon);
        } else if c == ';' {
            // The rest of the line is a comment
            break;
        } else if !c.is_whitespace() {
            tokens.push(lex_word(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    return Ok(tokens);
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn lex_normal_word() {
        let lines = vec![
            "bAaAb | a",
            "S->a",
            "epsilon"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (word("bAaAb"), " | a"),
            (word("S"), "->a"),
            (word("epsilon"), "")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_word(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_malformed_arrow() {
        for line in ["-", "- >", "-a"] {
            let mut chars = line.chars();
            assert_eq!(lex_arrow(&mut chars).unwrap_err(), CompileErrorType::MalformedArrow);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S -> bA | B",
            "nonterminals: S A",
            "C→epsilon|AB ; nullable"
        ];
        let answers = vec![
            vec![word("S"), Token::Arrow, word("bA"), Token::Or, word("B")],
            vec![word("nonterminals"), Token::Colon, word("S"), word("A")],
            vec![word("C"), Token::Arrow, word("epsilon"), Token::Or, word("AB")]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }
}
