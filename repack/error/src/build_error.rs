use std::{fmt, path::PathBuf};

use thiserror::Error;

/// The kind of file that a predicate refers to
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum AssetKind {
    Texture,
    Model,
    CopySource,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Texture => "texture",
            AssetKind::Model => "model",
            AssetKind::CopySource => "copy source",
        })
    }
}

/// Errors which occur while resolving the predicates of a workspace
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum BuildError {
    #[error("Variable '{name}' was not found")]
    UnresolvedVariable { name: String },
    #[error("The variable '{name}' is already defined")]
    VariableRedefined { name: String },
    #[error("Could not find {kind} '{path}' in '{}'", .root.display())]
    MissingAsset {
        kind: AssetKind,
        path: String,
        root: PathBuf,
    },
    #[error("Could not parse weight '{value}', it is not a valid integer")]
    InvalidWeight { value: String },
    #[error("Could not read file '{}': {message}", .path.display())]
    UnreadableFile { path: PathBuf, message: String },
    #[error("Could not read input directory '{}': {message}", .path.display())]
    InvalidInputDirectory { path: PathBuf, message: String },
}

impl BuildError {
    pub fn hints(&self) -> Vec<String> {
        match self {
            BuildError::UnresolvedVariable { .. } => vec![
                "Did you spell the name correctly?".to_string(),
                "Variables are defined with 'let name = \"value\"' or 'global name = \"value\"' and used like '$(name)'"
                    .to_string(),
            ],
            BuildError::VariableRedefined { .. } => {
                vec!["Variables cannot be redefined in the same scope, try renaming this one".to_string()]
            }
            BuildError::MissingAsset { kind, .. } => {
                let mut hints = vec!["Did you spell the file name correctly?".to_string()];
                match kind {
                    AssetKind::Texture => hints.push(
                        "Texture paths are relative to the input directory, '.png' may be omitted"
                            .to_string(),
                    ),
                    AssetKind::Model => hints.push(
                        "Model paths are relative to the input directory, '.json' may be omitted"
                            .to_string(),
                    ),
                    AssetKind::CopySource => {
                        hints.push("Copy sources are relative to the input directory".to_string());
                    }
                }
                hints
            }
            BuildError::InvalidWeight { .. } => {
                vec!["A weight has to be a whole number like \"5\" or \"-2\"".to_string()]
            }
            BuildError::UnreadableFile { .. } | BuildError::InvalidInputDirectory { .. } => vec![],
        }
    }
}

/// Errors of the output generation
///
/// These can only happen if a workspace was built without validating it first.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum CodegenError {
    #[error("Invalid workspace: {message}")]
    InvariantViolation { message: String },
}

/// Problems which do not prevent the output from being generated
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum Warning {
    #[error("No items match the predicate key '{key}'")]
    NoItemMatches { key: String },
}

impl Warning {
    pub fn hints(&self) -> Vec<String> {
        match self {
            Warning::NoItemMatches { .. } => vec![
                "Use a full item id like 'diamond_sword', a family like 'sword' or a pattern like '*_sword'"
                    .to_string(),
            ],
        }
    }
}
