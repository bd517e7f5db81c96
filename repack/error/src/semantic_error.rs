use thiserror::Error;

use crate::utils::display_list;

/// Violations of the scoping rules of a syntactically valid file
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum SemanticError {
    #[error("Unexpected token '{token}' in wrong scope")]
    WrongScope {
        token: String,
        statement: String,
        allowed: Vec<String>,
    },
    #[error("missing {missing} after {scope}")]
    MissingChainedScope { scope: String, missing: String },
    #[error("missing MAPALL_PREDICATE or MODEL_STATEMENT after IDENTIFIER_LIST")]
    MissingMapAllOrModel,
    #[error("IDENTIFIER_LIST is completed by both a MAPALL_PREDICATE and a MODEL_STATEMENT")]
    AmbiguousIdentifierList,
}

impl SemanticError {
    pub fn hints(&self) -> Vec<String> {
        match self {
            SemanticError::WrongScope {
                statement, allowed, ..
            } => vec![format!(
                "{statement} is only allowed inside of {}",
                display_list(allowed)
            )],
            SemanticError::MissingChainedScope { scope, missing } => {
                vec![format!("Every {scope} has to be followed by a {missing}")]
            }
            SemanticError::MissingMapAllOrModel => vec![
                "Assign a texture with '{ ... } = \"texture\"' or a model with 'model = \"model.json\"'"
                    .to_string(),
            ],
            SemanticError::AmbiguousIdentifierList => {
                vec!["Use either a texture or a model for an identifier list".to_string()]
            }
        }
    }
}
