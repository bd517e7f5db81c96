use std::fmt::Display;

use itertools::Itertools;

pub fn display_expected_of_any<T: Display>(collection: &[T]) -> String {
    display_expected_of(collection, "Expected one of")
}

/// Displays a string which says that the elements of `collection`
/// were expected.
pub fn display_expected_of<T: Display>(collection: &[T], expected_of: &str) -> String {
    match collection {
        [] => "Did not expect anything".to_string(),
        [single] => format!("Expected {single}"),
        many => format!("{expected_of} ({})", many.iter().join(", ")),
    }
}

/// Joins `collection` as a quoted, comma separated list
pub fn display_list<T: Display>(collection: &[T]) -> String {
    collection.iter().map(|val| format!("'{val}'")).join(", ")
}
