/// The result of replacing the variable references of a string
#[derive(Debug, PartialEq, Eq)]
pub struct Interpolated {
    pub value: String,
    /// Every referenced name that could not be resolved, in order of appearance
    pub unresolved: Vec<String>,
}

/// Replaces every `$(name)` in `text` with the value that `lookup` returns for `name`.
///
/// Substituted values are not scanned again. Unresolved references are replaced
/// by the empty string and reported in [`Interpolated::unresolved`].
/// A `$(` without a closing parenthesis is kept as is.
pub fn interpolate<'v>(text: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> Interpolated {
    let mut value = String::with_capacity(text.len());
    let mut unresolved = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("$(") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find(')') else {
            break;
        };

        value.push_str(&rest[..start]);
        let name = &after_open[..end];
        match lookup(name) {
            Some(replacement) => value.push_str(replacement),
            None => unresolved.push(name.to_string()),
        }
        rest = &after_open[end + 1..];
    }
    value.push_str(rest);

    Interpolated { value, unresolved }
}
