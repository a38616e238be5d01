//! The lexer struct is responsible for tokenizing SheetScript source code so that it can be fed
//! to the grammar engine.
//!
//! Besides keywords, literals and punctuation the lexer has to tell apart five identifier
//! families purely by their shape:
//! - `IDENT`: a lowercase letter followed by at least one of `[0-9A-Za-z_]` (`value`, `x1`)
//! - `RANGE_IDENT`: an underscore followed by at least one of `[0-9A-Za-z_]` (`_data`)
//! - `COORDINATE_IDENT`: one or two capitals followed by one to three digits (`C1`, `AB123`)
//! - `SHEET_IDENT`: capitals only (`SH`, `CCC`)
//! - `FUNC_IDENT`: one capital followed by `[a-z0-9_]*` (`Sum`, `Update_all`)
//!
//! The three capitalized families overlap, so the longest match wins and ties go to
//! coordinates, then sheets, then functions. Comments are enclosed in `...` on a single line
//! and are discarded together with spaces and carriage returns.
//!
//! Example:
//! ```rust
//! use sheetscript::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("scalar total := 1.0").tokenize();
//! ```
//! `tokenize` either returns the first error or a vector containing all tokens.

use std::{iter::Peekable, str::Chars};

use super::token::{Token, TokenKind};
use crate::error::SheetError::{self, LexicalError};
use crate::T;

/// The lexer struct is responsible for the tokeniziation of the source code.
///
/// It doubles as the token cursor of the grammar engine: as an iterator it yields one token at
/// a time and stops for good after the first error.
pub struct Lexer<'a> {
    /// Contains the source code. Used for 'cutting' out lexemes for the tokens.
    source: &'a str,
    /// Peekable iterator over all characters of the source string.
    chars: Peekable<Chars<'a>>,
    /// Current line, incremented on every line break.
    line: usize,
    /// Byte offset where the current token starts.
    start_idx: usize,
    /// Byte offset of the next unread character.
    current_idx: usize,
    /// Set once an error was returned, the iterator is exhausted afterwards.
    failed: bool,
}

/// Either a token, `None` for discarded input, or the error that ends tokenization.
type LexerResult = Result<Option<Token>, SheetError>;

impl<'a> Lexer<'a> {
    /// Create a new instance of `Lexer`
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            line: 1,
            start_idx: 0,
            current_idx: 0,
            failed: false,
        }
    }

    /// Tokenize the whole source string into a vector of tokens.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SheetError> {
        self.by_ref().collect()
    }

    /// The line the lexer is currently on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan one lexeme starting at the current position.
    fn next_token(&mut self) -> LexerResult {
        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(None),
        };
        let kind = match c {
            ' ' | '\r' => return Ok(None),
            '\n' => {
                self.line += 1;
                return Ok(None);
            }
            '(' => T!['('],
            ')' => T![')'],
            '[' => T!['['],
            ']' => T![']'],
            '{' => T!['{'],
            '}' => T!['}'],
            ',' => T![,],
            '\'' => T![squote],
            '$' => T![dollar],
            '#' => T![#],
            '=' => T![=],
            '+' => T![+],
            '*' => T![*],
            '/' => T![/],
            ':' => match self.advance_if(&|x| x == &'=') {
                Some(_) => T![:=],
                _ => T![:],
            },
            '<' => match self.advance_if(&|x| x == &'=') {
                Some(_) => T![<=],
                _ => T![<],
            },
            '>' => match self.advance_if(&|x| x == &'=') {
                Some(_) => T![>=],
                _ => T![>],
            },
            // `!=` takes precedence over an info string opened by the same `!`.
            '!' => match self.advance_if(&|x| x == &'=') {
                Some(_) => T![!=],
                _ => return self.info_string(),
            },
            '.' => return self.dots(),
            '-' if self.chars.peek().map_or(false, |d| d.is_ascii_digit()) => {
                return self.number()
            }
            '-' => T![-],
            '_' => return self.range_ident(),
            c if c.is_ascii_digit() => return self.number(),
            c if c.is_ascii_lowercase() => return self.keyword(),
            c if c.is_ascii_uppercase() => return self.capitalized(),
            c => return Err(self.illegal(c)),
        };
        self.new_token(kind)
    }

    //-------
    // HELPER
    //-------

    /// Extracts a substring from the source string starting at `start_idx` and ending at `current_idx`.
    fn get_substr_from_current_range(&self) -> &'a str {
        &self.source[self.start_idx..self.current_idx]
    }

    /// Convenience function for creating new `Token`s easily.
    fn new_token(&self, kind: TokenKind) -> LexerResult {
        Ok(Some(Token::new(
            kind,
            self.get_substr_from_current_range(),
            self.line,
        )))
    }

    fn illegal(&self, character: char) -> SheetError {
        LexicalError {
            character,
            line: self.line,
        }
    }

    /// Consume the current iterator and return the char it pointed at.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.current_idx += c.len_utf8();
        Some(c)
    }

    /// Only advance the iterator if the next character is the expected one.
    fn advance_if(&mut self, predicate: &dyn Fn(&char) -> bool) -> Option<char> {
        match self.chars.peek() {
            Some(c) if predicate(c) => self.advance(),
            _ => None,
        }
    }

    /// Consumes characters while a given predicate is fullfilled. Never crosses a line break.
    ///
    /// ## Example
    /// advance_while(&mut self, &|c| c.is_ascii_digit());
    fn advance_while(&mut self, predicate: &dyn Fn(&char) -> bool) {
        while self.advance_if(&|c| c != &'\n' && predicate(c)).is_some() {}
    }

    /// Check if the char iterator has reached the end.
    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Length in bytes of the current lexeme.
    fn lexeme_len(&self) -> usize {
        self.current_idx - self.start_idx
    }

    //---------
    // Literals
    //---------

    /// Tokenize an integer or decimal literal. The optional leading `-` has already been consumed.
    /// A decimal literal has exactly one digit after the dot, so `1.25` ends after `1.2`.
    fn number(&mut self) -> LexerResult {
        self.advance_while(&|c| c.is_ascii_digit());
        let mut lookahead = self.chars.clone();
        if lookahead.next() == Some('.') && lookahead.next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            self.advance();
            return self.new_token(T![decimal]);
        }
        self.new_token(T![int])
    }

    /// Tokenize an info string `!...!`. It has to be closed on the same line.
    fn info_string(&mut self) -> LexerResult {
        self.advance_while(&|c| c != &'!');
        match self.advance_if(&|c| c == &'!') {
            Some(_) => self.new_token(T![info]),
            None => Err(self.illegal('!')),
        }
    }

    /// Either a `..` token or a comment running to the last `...` of the line. The first dot
    /// has already been consumed.
    fn dots(&mut self) -> LexerResult {
        if self.advance_if(&|c| c == &'.').is_none() {
            return Err(self.illegal('.'));
        }
        let rest = &self.source[self.current_idx..];
        if let Some(body) = rest.strip_prefix('.') {
            let line_end = body.find('\n').unwrap_or(body.len());
            if let Some(close) = body[..line_end].rfind("...") {
                let comment_end = self.current_idx + 1 + close + 3;
                while self.current_idx < comment_end {
                    self.advance();
                }
                return Ok(None);
            }
        }
        self.new_token(T![..])
    }

    //----------------------
    // Identifier & keywords
    //----------------------

    /// Scans a lowercase word. If it's not a known keyword it has to be an identifier, which
    /// needs at least two characters.
    fn keyword(&mut self) -> LexerResult {
        self.advance_while(&|c| c.is_ascii_alphanumeric() || c == &'_');
        let substr = self.get_substr_from_current_range();
        if substr.len() < 2 {
            return Err(self.illegal(substr.chars().next().unwrap_or('?')));
        }
        let kind = Token::get_keyword(substr).unwrap_or(T![ident]);
        self.new_token(kind)
    }

    /// `_` followed by at least one alphanumeric or underscore.
    fn range_ident(&mut self) -> LexerResult {
        self.advance_while(&|c| c.is_ascii_alphanumeric() || c == &'_');
        if self.lexeme_len() < 2 {
            return Err(self.illegal('_'));
        }
        self.new_token(T![range_ident])
    }

    /// Decide between coordinate, sheet and function identifiers for a word starting with a
    /// capital letter. The first letter has already been consumed.
    fn capitalized(&mut self) -> LexerResult {
        let text = self.source[self.start_idx..].as_bytes();
        let count = |from: usize, predicate: &dyn Fn(u8) -> bool| {
            text[from..].iter().take_while(|b| predicate(**b)).count()
        };

        let sheet_len = count(0, &|b| b.is_ascii_uppercase());
        let func_len = 1 + count(1, &|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        let digits = count(sheet_len, &|b| b.is_ascii_digit());
        let coordinate_len = if sheet_len <= 2 && digits > 0 {
            sheet_len + digits.min(3)
        } else {
            0
        };

        // Candidates in priority order, so a tie keeps the earlier one.
        let (kind, len) = [
            (T![coord], coordinate_len),
            (T![sheet_ident], sheet_len),
            (T![func_ident], func_len),
        ]
        .iter()
        .fold((T![sheet_ident], 0), |best, candidate| {
            if candidate.1 > best.1 {
                *candidate
            } else {
                best
            }
        });

        while self.lexeme_len() < len {
            self.advance();
        }
        self.new_token(kind)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, SheetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while !self.is_at_end() {
            self.start_idx = self.current_idx;
            match self.next_token() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
