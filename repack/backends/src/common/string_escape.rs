/// Escapes a string so it can be placed inside of a json string literal:
/// Quotes, backslashes and control characters are escaped
pub fn escape_json(string: &str) -> impl Iterator<Item = char> + '_ {
    string.chars().flat_map(|chr| match chr {
        '"' => StringEscape::Str("\\\""),
        '\\' => StringEscape::Str("\\\\"),
        '\n' => StringEscape::Str("\\n"),
        '\r' => StringEscape::Str("\\r"),
        '\t' => StringEscape::Str("\\t"),
        c => StringEscape::Char(c),
    })
}

/// This implements iterator to allow for the flat_map operation
enum StringEscape {
    Str(&'static str),
    Char(char),
    None,
}

impl Iterator for StringEscape {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            StringEscape::Str(str) => {
                let mut chars = str.chars();
                let char = chars.next();
                if char.is_some() {
                    *str = chars.as_str();
                } else {
                    *self = StringEscape::None;
                }
                char
            }
            StringEscape::Char(chr) => {
                let chr = *chr;
                *self = StringEscape::None;
                Some(chr)
            }
            StringEscape::None => None,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::common::string_escape::escape_json;

    #[test]
    fn test_escape_json() {
        assert_eq!(
            escape_json("This\ncontains\nsome\nnewlines").collect::<String>(),
            "This\\ncontains\\nsome\\nnewlines"
        );
        assert_eq!(
            escape_json("Now \\ some \\ backslashes").collect::<String>(),
            "Now \\\\ some \\\\ backslashes"
        );
        assert_eq!(
            escape_json("A \"quoted\" pack").collect::<String>(),
            "A \\\"quoted\\\" pack"
        );
    }
}
