/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::{verify_rules, Declarations, IntermediateRuleset};

#[derive(Debug)]
pub enum CompileErrorType {
    // A rule line without `->` after the nonterminal
    MissingArrow,
    // A `->` somewhere other than after the nonterminal
    UnexpectedArrow,
    // A `-` that does not start `->`
    MalformedArrow,
    // A `:` somewhere other than after a declaration keyword
    UnexpectedColon,
    // A `|` inside a declaration
    UnexpectedOr,
    // A line starting with something other than a nonterminal or keyword
    MissingNonterminal,
    // Symbol names are a single character
    MultiCharacterSymbol(String),
    // Nothing between two `|`, or after the last one
    EmptyAlternative,
    // A declaration keyword other than nonterminals, terminals or start
    UnknownDeclaration(String),
    // The start declaration needs exactly one symbol
    ExpectedOneStartSymbol,
    // The file never declares this vocabulary
    MissingDeclaration(&'static str),
    // The grammar as a whole is inconsistent
    Invalid(ValidationError),
    // Somehow a full rewrite was parsed as a single alternative
    // This is a problem with chomsky, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with chomsky, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::MultiCharacterSymbol(a), CompileErrorType::MultiCharacterSymbol(b)) => a == b,
            (CompileErrorType::UnknownDeclaration(a), CompileErrorType::UnknownDeclaration(b)) => a == b,
            (CompileErrorType::MissingDeclaration(a), CompileErrorType::MissingDeclaration(b)) => a == b,
            (CompileErrorType::Invalid(a), CompileErrorType::Invalid(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            CompileErrorType::MalformedArrow => write!(f, "Expected `>` after `-`"),
            CompileErrorType::UnexpectedColon => write!(f, "Unexpected `:` encountered"),
            CompileErrorType::UnexpectedOr => write!(f, "Unexpected `|` in a declaration"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::MultiCharacterSymbol(symbol) => write!(f, "Symbol `{}` is longer than one character", symbol),
            CompileErrorType::EmptyAlternative => write!(f, "Empty alternative (write `{}` for an empty production)", EPSILON),
            CompileErrorType::UnknownDeclaration(keyword) => write!(f, "Unknown declaration `{}`", keyword),
            CompileErrorType::ExpectedOneStartSymbol => write!(f, "Expected exactly one start symbol"),
            CompileErrorType::MissingDeclaration(keyword) => write!(f, "Missing `{}:` declaration", keyword),
            CompileErrorType::Invalid(error) => write!(f, "{}", error),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

const NONTERMINALS: &str = "nonterminals";
const TERMINALS: &str = "terminals";
const START: &str = "start";

#[derive(PartialEq, Debug, Clone, Copy)]
enum DeclarationKind {
    Nonterminals,
    Terminals,
    Start,
}

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: char,
    alternatives: Vec<String>,
}

#[derive(PartialEq, Debug)]
enum Line {
    Declaration(DeclarationKind, Vec<char>),
    Rule(Rule),
}

fn parse_symbol(word: &str) -> Result<char> {
    match word.chars().collect_vec().as_slice() {
        &[c] => Ok(c),
        _ => Err(CompileErrorType::MultiCharacterSymbol(word.to_string())),
    }
}

fn parse_alternative(tokens: &[Token]) -> Result<String> {
    let alternative: String = tokens.iter().map(|t| match t {
        Token::Arrow => Err(CompileErrorType::UnexpectedArrow),
        Token::Colon => Err(CompileErrorType::UnexpectedColon),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Word(s) => Ok(s.as_str())
    }).collect::<Result<Vec<_>>>()?.concat();

    if alternative.is_empty() {
        return Err(CompileErrorType::EmptyAlternative);
    }
    Ok(alternative)
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<String>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_declaration(keyword: &str, tokens: &[Token]) -> Result<Line> {
    let kind = match keyword {
        NONTERMINALS => DeclarationKind::Nonterminals,
        TERMINALS => DeclarationKind::Terminals,
        START => DeclarationKind::Start,
        _ => return Err(CompileErrorType::UnknownDeclaration(keyword.to_string())),
    };

    let symbols = tokens.iter().map(|t| match t {
        Token::Arrow => Err(CompileErrorType::UnexpectedArrow),
        Token::Colon => Err(CompileErrorType::UnexpectedColon),
        Token::Or => Err(CompileErrorType::UnexpectedOr),
        Token::Word(s) => parse_symbol(s)
    }).collect::<Result<Vec<_>>>()?;

    if kind == DeclarationKind::Start && symbols.len() != 1 {
        return Err(CompileErrorType::ExpectedOneStartSymbol);
    }

    Ok(Line::Declaration(kind, symbols))
}

fn parse_line(tokens: &[Token]) -> Result<Line> {
    match tokens {
        [Token::Word(keyword), Token::Colon, rest @ ..] => parse_declaration(keyword, rest),
        [Token::Word(symbol), Token::Arrow, rest @ ..] => Ok(Line::Rule(Rule {
            symbol: parse_symbol(symbol)?,
            alternatives: parse_rewrite(rest)?
        })),
        [Token::Word(_), ..] => Err(CompileErrorType::MissingArrow),
        [_, ..] => Err(CompileErrorType::MissingNonterminal),
        [] => Err(CompileErrorType::UnexpectedBlankLine),
    }
}

fn parse_lex_line(line: &str, location: &Location) -> LineResult<Line> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line))
        .map_err(|error| CompileError { location: location.clone(), error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in CompileError and enumerated
fn reader_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

// Folds the parsed lines into declarations and one rule per nonterminal
fn grammar_from_lines(lines: Vec<(Line, Location)>, path: &Path) -> FileResult<Grammar> {
    let mut nonterminals: Option<(Vocabulary, Location)> = None;
    let mut terminals: Option<(Vocabulary, Location)> = None;
    let mut start: Option<(char, Location)> = None;
    let mut rules = IntermediateRuleset::new();

    for (line, location) in lines {
        match line {
            Line::Declaration(DeclarationKind::Nonterminals, symbols) => nonterminals
                .get_or_insert_with(|| (Vocabulary::new(), location))
                .0
                .extend(symbols),
            Line::Declaration(DeclarationKind::Terminals, symbols) => terminals
                .get_or_insert_with(|| (Vocabulary::new(), location))
                .0
                .extend(symbols),
            Line::Declaration(DeclarationKind::Start, symbols) => {
                start = symbols.first().map(|&symbol| (symbol, location));
            }
            Line::Rule(rule) => rules
                .entry(rule.symbol)
                .or_insert_with(|| (Vec::new(), location))
                .0
                .extend(rule.alternatives),
        }
    }

    let missing = |keyword| vec![CompileError {
        location: Location::file(path.to_path_buf()),
        error: CompileErrorType::MissingDeclaration(keyword)
    }];
    let nonterminals = nonterminals.ok_or_else(|| missing(NONTERMINALS))?;
    let terminals = terminals.ok_or_else(|| missing(TERMINALS))?;
    let start = match start {
        Some(start) => start,
        None => match nonterminals.0.first() {
            Some(&first) => (first, nonterminals.1.clone()),
            None => return Err(missing(NONTERMINALS)),
        },
    };

    let declarations = Declarations { nonterminals, terminals, start };
    verify_rules(&rules, &declarations)?;

    let raw: RawProductions = rules.into_iter()
        .map(|(symbol, (alternatives, _))| (symbol, alternatives))
        .collect();
    let Declarations { nonterminals, terminals, start } = declarations;

    Grammar::new(&raw, nonterminals.0, terminals.0, start.0).map_err(|errors| {
        errors.into_iter()
            .map(|error| CompileError {
                location: Location::file(path.to_path_buf()),
                error: CompileErrorType::Invalid(error)
            })
            .collect()
    })
}

/// Parses a grammar from any line source; `path` only labels the errors.
pub fn parse_reader<'a>(reader: impl BufRead + 'a, path: &'a Path) -> FileResult<Grammar> {
    let lines = reader_line_nums(reader, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        let location = Location {
            file: path.to_path_buf(),
            line: num
        };
        line_res
            .and_then(|line| parse_lex_line(&line, &location))
            .map(|line| (line, location))
    });

    let (lines, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return grammar_from_lines(lines, path);
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_reader(std::io::BufReader::new(file), path)
}
