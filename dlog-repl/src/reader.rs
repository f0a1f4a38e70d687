//! A minimal surface-syntax reader: tokenizer + S-expression parser.
//!
//! Surface syntax tokenization lives outside the evaluator core, but the
//! driver loop has to come from *somewhere* — a REPL that can't read
//! `(job ?who (computer wizard))` off stdin isn't a REPL. This reader is
//! the narrow, external piece that fills that gap; it has no bearing on
//! evaluator semantics and produces bare `Term` trees of symbols, exactly
//! what `dlog_ir::query_syntax_process` expects as input.

use std::fmt;

use dlog_ir::Term;

#[derive(Debug)]
pub struct ReadError(String);

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read error: {}", self.0)
    }
}

impl std::error::Error for ReadError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Atom(String),
    Str(String),
}

fn tokenize(src: &str) -> Result<Vec<Token>, ReadError> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            ';' => {
                // Line comment: skip through end of line.
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '(' | '[' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' | ']' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => s.push(escaped),
                            None => return Err(ReadError("unterminated string escape".into())),
                        },
                        Some(c) => s.push(c),
                        None => return Err(ReadError("unterminated string literal".into())),
                    }
                }
                tokens.push(Token::Str(s));
            }
            _ => {
                let mut atom = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '[' || c == ']' || c == ';'
                    {
                        break;
                    }
                    atom.push(c);
                    chars.next();
                }
                tokens.push(Token::Atom(atom));
            }
        }
    }

    Ok(tokens)
}

/// Parses every top-level form in `src` into a `Term`. Each form is a bare
/// term tree of symbols/numbers/strings/pairs — `?`-prefixed atoms are
/// *not* rewritten here; that is `dlog_ir::query_syntax_process`'s job, run
/// by the caller once a form has been classified as a query.
pub fn read_all(src: &str) -> Result<Vec<Term>, ReadError> {
    let tokens = tokenize(src)?;
    let mut pos = 0;
    let mut forms = Vec::new();
    while pos < tokens.len() {
        let (term, next) = parse_term(&tokens, pos)?;
        forms.push(term);
        pos = next;
    }
    Ok(forms)
}

/// Parses exactly one top-level form from `src`, erroring if there is
/// anything left over (or nothing at all). Used by the interactive loop,
/// which reads line-by-line rather than a whole file at once.
pub fn read_one(src: &str) -> Result<Term, ReadError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(ReadError("empty input".into()));
    }
    let (term, next) = parse_term(&tokens, 0)?;
    if next != tokens.len() {
        return Err(ReadError("trailing input after one form".into()));
    }
    Ok(term)
}

fn parse_term(tokens: &[Token], pos: usize) -> Result<(Term, usize), ReadError> {
    match tokens.get(pos) {
        None => Err(ReadError("unexpected end of input".into())),
        Some(Token::RParen) => Err(ReadError("unexpected `)`".into())),
        Some(Token::LParen) => parse_list(tokens, pos + 1),
        Some(Token::Str(s)) => Ok((Term::Constant(dlog_ir::Constant::Str(s.as_str().into())), pos + 1)),
        Some(Token::Atom(atom)) => Ok((parse_atom(atom), pos + 1)),
    }
}

fn parse_list(tokens: &[Token], mut pos: usize) -> Result<(Term, usize), ReadError> {
    let mut items = Vec::new();
    loop {
        match tokens.get(pos) {
            None => return Err(ReadError("unterminated list".into())),
            Some(Token::RParen) => {
                pos += 1;
                break;
            }
            _ => {
                let (item, next) = parse_term(tokens, pos)?;
                items.push(item);
                pos = next;
            }
        }
    }
    Ok((Term::list(items), pos))
}

fn parse_atom(atom: &str) -> Term {
    if atom == "()" {
        return Term::nil();
    }
    if atom == "#t" {
        return Term::Constant(dlog_ir::Constant::Bool(true));
    }
    if atom == "#f" {
        return Term::Constant(dlog_ir::Constant::Bool(false));
    }
    if let Ok(n) = atom.parse::<i64>() {
        return Term::number(n);
    }
    Term::symbol(atom)
}
