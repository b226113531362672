//! Nesting guards run around the parser.
//!
//! Pathological inputs are rejected as a typed [`ParseError::NestingLimit`].
//! The lexical pre-scan catches deep brackets, absurd indentation and runaway
//! operator chains before parsing, so the parser never builds a tree it could
//! not tear down. The post-parse check bounds what is left: trees that nest
//! deeply through unary runs, lambdas or trailers.

use crate::core::ast::tree_depth;
use crate::errors::ParseError;
use rustpython_parser::ast::Stmt;
use serde::{Deserialize, Serialize};

/// CPython refuses more than 200 nested parentheses.
pub const DEFAULT_BRACKET_LIMIT: usize = 200;
/// CPython refuses more than 100 indentation levels.
pub const DEFAULT_INDENTATION_LIMIT: usize = 100;
/// `elif` links and left-associative operator chains do not count.
pub const DEFAULT_TREE_DEPTH_LIMIT: usize = 1_000;
/// Operators in one unseparated chain at a single bracket level.
pub const DEFAULT_OPERATOR_CHAIN_LIMIT: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestingLimits {
    pub brackets: usize,
    pub indentation: usize,
    pub tree_depth: usize,
    pub operator_chain: usize,
}

impl Default for NestingLimits {
    fn default() -> Self {
        Self {
            brackets: DEFAULT_BRACKET_LIMIT,
            indentation: DEFAULT_INDENTATION_LIMIT,
            tree_depth: DEFAULT_TREE_DEPTH_LIMIT,
            operator_chain: DEFAULT_OPERATOR_CHAIN_LIMIT,
        }
    }
}

/// Keywords that apply an operator to what follows them.
const OPERATOR_WORDS: &[&str] = &["and", "await", "else", "if", "lambda", "not", "or"];

/// Keywords after which a bracket opens a new expression rather than a call
/// or subscript.
const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Lexical pre-scan: bracket depth and indentation depth.
pub fn check_source(source: &str, limits: &NestingLimits) -> Result<(), ParseError> {
    let mut scanner = Scanner::default();
    source
        .lines()
        .try_for_each(|line| scanner.scan_line(line, limits))
}

/// Post-parse check of the syntax tree's depth, walked without recursion.
pub fn check_tree(body: &[Stmt], limits: &NestingLimits) -> Result<(), ParseError> {
    let depth = tree_depth(body);
    if depth > limits.tree_depth {
        return Err(ParseError::NestingLimit {
            what: "syntax tree",
            depth,
            limit: limits.tree_depth,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct OpenString {
    quote: u8,
    triple: bool,
}

/// Line-by-line lexer state.
///
/// `chain` counts operators since the last separator (`,`, `;`, `=`) at the
/// current bracket level; the counts of enclosing levels wait in
/// `outer_chains`. A call or subscript trailer counts as one operator of the
/// level it follows, since `f()()()` nests like `a.b.c`.
#[derive(Debug, Default)]
struct Scanner {
    brackets: usize,
    indents: Vec<usize>,
    string: Option<OpenString>,
    continued: bool,
    chain: usize,
    outer_chains: Vec<usize>,
    after_operand: bool,
}

impl Scanner {
    fn scan_line(&mut self, line: &str, limits: &NestingLimits) -> Result<(), ParseError> {
        if self.at_logical_line_start() {
            self.track_indentation(line, limits)?;
        }

        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];

            if let Some(open) = self.string {
                if c == b'\\' {
                    i += 2;
                    continue;
                }
                if c == open.quote {
                    if !open.triple {
                        self.close_string();
                    } else if bytes[i..].starts_with(&[c, c, c]) {
                        self.close_string();
                        i += 3;
                        continue;
                    }
                }
                i += 1;
                continue;
            }

            match c {
                b'#' => break,
                b'\'' | b'"' => {
                    let triple = bytes[i..].starts_with(&[c, c, c]);
                    self.string = Some(OpenString { quote: c, triple });
                    i += if triple { 3 } else { 1 };
                    continue;
                }
                c if is_word_byte(c) && !c.is_ascii_digit() => {
                    let end = word_end(bytes, i);
                    let word = line.get(i..end).unwrap_or("");
                    if OPERATOR_WORDS.contains(&word) {
                        self.count_operator(limits)?;
                    }
                    self.after_operand = !KEYWORDS.contains(&word);
                    i = end;
                    continue;
                }
                c if c.is_ascii_digit() => {
                    i = number_end(bytes, i);
                    self.after_operand = true;
                    continue;
                }
                b'(' | b'[' | b'{' => {
                    if c != b'{' && self.after_operand {
                        self.count_operator(limits)?;
                    }
                    self.open_bracket(limits)?;
                }
                b')' | b']' | b'}' => {
                    self.brackets = self.brackets.saturating_sub(1);
                    self.chain = self.outer_chains.pop().unwrap_or(0);
                    self.after_operand = true;
                    i += 1;
                    continue;
                }
                b',' | b';' => self.chain = 0,
                b'=' => {
                    let prev = i.checked_sub(1).map(|p| bytes[p]);
                    let compound = prev.is_some_and(|p| b"<>!=:+-*/%@&|^".contains(&p));
                    if !compound && bytes.get(i + 1) != Some(&b'=') {
                        self.chain = 0;
                    }
                }
                b'.' => {
                    if bytes.get(i + 1).is_some_and(|&next| is_word_byte(next)) {
                        self.count_operator(limits)?;
                    }
                }
                b'+' | b'-' | b'*' | b'/' | b'%' | b'@' | b'&' | b'|' | b'^' | b'~' | b'<'
                | b'>' => self.count_operator(limits)?,
                _ => {}
            }
            if !c.is_ascii_whitespace() {
                self.after_operand = false;
            }
            i += 1;
        }

        let ends_with_backslash = line.trim_end().ends_with('\\');
        if let Some(open) = self.string {
            // An unterminated single-quoted string is a syntax error the parser reports.
            if !open.triple && !ends_with_backslash {
                self.string = None;
            }
        }
        self.continued = ends_with_backslash && self.string.is_none();
        if self.at_logical_line_start() {
            self.chain = 0;
            self.outer_chains.clear();
            self.after_operand = false;
        }
        Ok(())
    }

    fn close_string(&mut self) {
        self.string = None;
        self.after_operand = true;
    }

    fn open_bracket(&mut self, limits: &NestingLimits) -> Result<(), ParseError> {
        self.brackets += 1;
        if self.brackets > limits.brackets {
            return Err(ParseError::NestingLimit {
                what: "brackets",
                depth: self.brackets,
                limit: limits.brackets,
            });
        }
        self.outer_chains.push(self.chain);
        self.chain = 0;
        Ok(())
    }

    fn count_operator(&mut self, limits: &NestingLimits) -> Result<(), ParseError> {
        self.chain += 1;
        if self.chain > limits.operator_chain {
            return Err(ParseError::NestingLimit {
                what: "operator chain",
                depth: self.chain,
                limit: limits.operator_chain,
            });
        }
        Ok(())
    }

    fn at_logical_line_start(&self) -> bool {
        self.string.is_none() && self.brackets == 0 && !self.continued
    }

    fn track_indentation(&mut self, line: &str, limits: &NestingLimits) -> Result<(), ParseError> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        let width = indent_width(line);
        while self.indents.last().is_some_and(|&top| top > width) {
            self.indents.pop();
        }
        if self.indents.last().map_or(width > 0, |&top| width > top) {
            self.indents.push(width);
            if self.indents.len() > limits.indentation {
                return Err(ParseError::NestingLimit {
                    what: "indentation",
                    depth: self.indents.len(),
                    limit: limits.indentation,
                });
            }
        }
        Ok(())
    }
}

fn is_word_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || !c.is_ascii()
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&c| !is_word_byte(c))
        .map_or(bytes.len(), |len| start + len)
}

/// End of a numeric literal, including any fraction, exponent or suffix.
fn number_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&c| !(is_word_byte(c) || c == b'.'))
        .map_or(bytes.len(), |len| start + len)
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .fold(0, |width, c| match c {
            '\t' => (width / 8 + 1) * 8,
            _ => width + 1,
        })
}
