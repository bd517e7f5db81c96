use core::fmt;
use std::{
    borrow::Cow,
    hash::{Hash, Hasher},
};

use repack_common::{CodeId, SourceLocation};
use smol_str::SmolStr;

use crate::node::NodeType;

/// A single token of a source file.
///
/// String literals keep their raw text, including the quotes and escape sequences.
/// Two tokens are equal if their text is equal, regardless of where they were found.
#[derive(Debug, Clone)]
pub struct Token {
    text: SmolStr,
    pub line: usize,
    pub column: usize,
    pub file: Option<CodeId>,
}

impl Token {
    pub fn new(text: impl Into<SmolStr>, line: usize, column: usize, file: Option<CodeId>) -> Self {
        Token {
            text: text.into(),
            line,
            column,
            file,
        }
    }

    /// Creates a token which does not belong to any source file
    pub fn synthetic(text: impl Into<SmolStr>) -> Self {
        Token::new(text, 0, 0, None)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NodeType {
        NodeType::of(&self.text)
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.file, self.line, self.column, self.text.chars().count())
    }

    /// Returns the value of this token.
    ///
    /// For string literals the quotes are removed and escape sequences are replaced,
    /// every other token is returned as is.
    pub fn string_value(&self) -> Cow<'_, str> {
        match unquote(&self.text) {
            Some(inner) if inner.contains('\\') => Cow::Owned(unescape(inner)),
            Some(inner) => Cow::Borrowed(inner),
            None => Cow::Borrowed(&self.text),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub(crate) fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn unquote(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| is_quote(*c))?;
    text.get(1..)?.strip_suffix(quote)
}

/// Replaces the escape sequences of an already validated string literal
fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('r') => result.push('\r'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push_str("\\u");
                        result.push_str(&digits);
                    }
                }
            }
            Some(digit @ '0'..='9') => {
                result.extend(digit.to_digit(10).and_then(char::from_u32));
            }
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Token;
    use crate::node::NodeType;

    #[test]
    fn equality_ignores_position() {
        let a = Token::new("sword", 1, 1, None);
        let b = Token::new("sword", 5, 9, None);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn string_values() {
        assert_eq!(Token::synthetic("\"textures/a\"").string_value(), "textures/a");
        assert_eq!(Token::synthetic("'it\"s'").string_value(), "it\"s");
        assert_eq!(Token::synthetic(r#""a\nb""#).string_value(), "a\nb");
        assert_eq!(Token::synthetic(r#""A\\""#).string_value(), "A\\");
        assert_eq!(Token::synthetic(r#""\'\"""#).string_value(), "'\"");
        assert_eq!(Token::synthetic(r#""\0""#).string_value(), "\0");
        assert_eq!(Token::synthetic("match").string_value(), "match");
    }

    #[test]
    fn kinds() {
        assert_eq!(Token::synthetic("match").kind(), NodeType::Match);
        assert_eq!(Token::synthetic("'match'").kind(), NodeType::StringLiteral);
        assert_eq!(Token::synthetic("=>").kind(), NodeType::Arrow);
        assert_eq!(Token::synthetic("nbt.display.Name").kind(), NodeType::Identifier);
    }
}
