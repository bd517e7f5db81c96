//! Diagnostics of the compiler
//!
//! Every fallible step returns its problems as [`Diagnostic`] values, which are collected
//! into [`Diagnostics`] and rendered with `annotate_snippets`.
pub use build_error::{AssetKind, BuildError, CodegenError, Warning};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use diagnostics::{Diagnostics, Outcome};
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use semantic_error::SemanticError;

pub mod utils;

mod build_error;
mod diagnostic;
mod diagnostics;
mod lex_error;
mod parse_error;
mod semantic_error;
mod snippet;

/// Used to determine whether the error messages should use console colors
/// Or be plain text
pub const COLORED: bool = cfg!(feature = "colored_errors");

/// The result type of the steps that abort at their first diagnostic
pub type Result<T> = std::result::Result<T, Diagnostic>;
