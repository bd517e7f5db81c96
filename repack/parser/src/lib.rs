//! Front end of the compiler
//!
//! Source text is split into [`token::Token`]s by the [`tokenizer`], arranged into a
//! [`syntax_tree::SyntaxTree`] by the [`parser`] and finally checked against the scoping
//! rules by the [`tree_analyzer`].
use repack_common::CodeId;
use repack_error::Result;

pub mod node;
pub mod parser;
pub mod syntax_tree;
pub mod token;
pub mod tokenizer;
pub mod tree_analyzer;

pub use node::{Node, NodeId, NodeType};
pub use syntax_tree::SyntaxTree;
pub use token::Token;

/// Tokenizes and parses a whole file.
///
/// The returned tree still has to be validated with [`tree_analyzer::analyze`].
pub fn parse_source(source: &str, file: Option<CodeId>) -> Result<SyntaxTree> {
    let tokens = tokenizer::tokenize(source, file)?;
    parser::parse(&tokens)
}
