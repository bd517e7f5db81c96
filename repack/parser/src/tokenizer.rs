//! Splits source text into [`Token`]s
use std::{iter::Peekable, str::Chars};

use repack_common::{CodeId, SourceLocation};
use repack_error::{Diagnostic, LexError, Result};

use crate::{node::NodeType, token::is_quote, token::Token};

/// Tokens which are made up of more than one special character
const MULTI_TOKENS: [&str; 1] = ["=>"];

fn is_special(c: char) -> bool {
    matches!(c, ',' | '(' | ')' | '{' | '}' | '=' | '>')
}

pub fn tokenize(source: &str, file: Option<CodeId>) -> Result<Vec<Token>> {
    Tokenizer::new(source, file).run()
}

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    file: Option<CodeId>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    current: String,
    current_start: (usize, usize),
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str, file: Option<CodeId>) -> Self {
        Tokenizer {
            chars: source.chars().peekable(),
            file,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            current: String::new(),
            current_start: (1, 1),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(&c) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.flush();
                    self.bump();
                }
                '/' if self.peek_second() == Some('/') => {
                    self.flush();
                    self.skip_line_comment();
                }
                '/' if self.peek_second() == Some('*') => {
                    self.flush();
                    self.skip_block_comment()?;
                }
                c if is_quote(c) => {
                    self.flush();
                    self.read_string()?;
                }
                c if is_special(c) => {
                    if !self.can_fuse(c) {
                        self.flush();
                    }
                    self.push_current();
                }
                _ => {
                    if self.current.starts_with(is_special) {
                        self.flush();
                    }
                    self.push_current();
                }
            }
        }

        self.flush();
        Ok(self.tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    fn location(&self, (line, column): (usize, usize), len: usize) -> SourceLocation {
        SourceLocation::new(self.file, line, column, len)
    }

    /// Moves the next character into the current token
    fn push_current(&mut self) {
        if self.current.is_empty() {
            self.current_start = (self.line, self.column);
        }
        if let Some(c) = self.bump() {
            self.current.push(c);
        }
    }

    /// Whether special character `c` continues the current special token
    fn can_fuse(&self, c: char) -> bool {
        if self.current.is_empty() || !self.current.chars().all(is_special) {
            return false;
        }
        let fused = format!("{}{c}", self.current);
        MULTI_TOKENS.iter().any(|multi| multi.starts_with(&fused))
            && !NodeType::of(&fused).is_keyword()
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current);
        let (line, column) = self.current_start;
        self.tokens.push(Token::new(text, line, column, self.file));
    }

    fn skip_line_comment(&mut self) {
        while self.chars.peek().is_some_and(|c| *c != '\n') {
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start = (self.line, self.column);
        self.bump();
        self.bump();

        loop {
            match self.bump() {
                Some('*') if self.chars.peek() == Some(&'/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    return Err(Diagnostic::at(
                        LexError::UnterminatedComment,
                        self.location(start, 2),
                    ))
                }
            }
        }
    }

    fn read_string(&mut self) -> Result<()> {
        let start = (self.line, self.column);
        let Some(quote) = self.bump() else {
            return Ok(());
        };
        let mut text = String::from(quote);

        loop {
            let escape_start = (self.line, self.column);
            match self.bump() {
                None => {
                    return Err(Diagnostic::at(
                        LexError::UnterminatedString,
                        self.location(start, 1),
                    ))
                }
                Some('\n') => {
                    return Err(Diagnostic::at(
                        LexError::NewlineInString,
                        self.location(start, 1),
                    ))
                }
                Some('\\') => {
                    text.push('\\');
                    self.read_escape(&mut text, escape_start, start)?;
                }
                Some(c) => {
                    text.push(c);
                    if c == quote {
                        break;
                    }
                }
            }
        }

        self.tokens
            .push(Token::new(text, start.0, start.1, self.file));
        Ok(())
    }

    /// Reads the escape sequence after a backslash into `text`
    fn read_escape(
        &mut self,
        text: &mut String,
        escape_start: (usize, usize),
        string_start: (usize, usize),
    ) -> Result<()> {
        let invalid = |this: &Self, sequence: String| {
            let len = sequence.chars().count();
            Diagnostic::at(
                LexError::InvalidEscape { sequence },
                this.location(escape_start, len),
            )
        };

        match self.chars.peek().copied() {
            None => Err(Diagnostic::at(
                LexError::UnterminatedString,
                self.location(string_start, 1),
            )),
            Some('n' | 't' | 'b' | 'f' | 'r' | '"' | '\'' | '\\' | '0'..='9') => {
                if let Some(c) = self.bump() {
                    text.push(c);
                }
                Ok(())
            }
            Some('u') => {
                self.bump();
                let mut sequence = String::from("\\u");
                for _ in 0..4 {
                    match self.chars.peek().copied() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            self.bump();
                            sequence.push(c);
                        }
                        _ => return Err(invalid(self, sequence)),
                    }
                }
                text.push_str(&sequence[1..]);
                Ok(())
            }
            Some('\n') => Err(Diagnostic::at(
                LexError::NewlineInString,
                self.location(string_start, 1),
            )),
            Some(other) => Err(invalid(self, format!("\\{other}"))),
        }
    }
}
