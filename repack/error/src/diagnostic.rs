use std::fmt;

use repack_common::{InputFiles, SourceLocation};
use thiserror::Error;

use crate::{
    snippet::{DiagnosticSnippet, SourceLine},
    BuildError, CodegenError, LexError, ParseError, SemanticError, Warning,
};

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Everything that can be reported to the user
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum DiagnosticKind {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
    #[error(transparent)]
    Warning(#[from] Warning),
}

impl DiagnosticKind {
    pub fn id(&self) -> &'static str {
        match self {
            DiagnosticKind::Lex(_) => "Lex",
            DiagnosticKind::Parse(_) => "Parse",
            DiagnosticKind::Semantic(_) => "Semantic",
            DiagnosticKind::Build(_) => "Build",
            DiagnosticKind::Codegen(_) => "Codegen",
            DiagnosticKind::Warning(_) => "Warning",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::Warning(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn hints(&self) -> Vec<String> {
        match self {
            DiagnosticKind::Lex(err) => err.hints(),
            DiagnosticKind::Parse(err) => err.hints(),
            DiagnosticKind::Semantic(err) => err.hints(),
            DiagnosticKind::Build(err) => err.hints(),
            DiagnosticKind::Codegen(_) => {
                vec!["This is a bug in the compiler, please report it".to_string()]
            }
            DiagnosticKind::Warning(warning) => warning.hints(),
        }
    }
}

/// A single error or warning, optionally pointing into a source file
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub location: Option<SourceLocation>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: impl Into<DiagnosticKind>, location: Option<SourceLocation>) -> Self {
        let kind = kind.into();
        Diagnostic {
            severity: kind.severity(),
            hints: kind.hints(),
            kind,
            location,
        }
    }

    pub fn at(kind: impl Into<DiagnosticKind>, location: SourceLocation) -> Self {
        Diagnostic::new(kind, Some(location))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Renders this diagnostic with the source line it points at
    pub fn format(&self, input_files: &InputFiles) -> String {
        let mut snippet = DiagnosticSnippet {
            severity: self.severity,
            id: self.kind.id(),
            title: self.kind.to_string(),
            line: None,
            position: None,
            hints: &self.hints,
        };

        if let Some(location) = self.location {
            let code = location.file.map(|file| input_files.get_input(file));
            match code.and_then(|code| code.line(location.line).map(|line| (code, line))) {
                Some((code, text)) => {
                    let len = text.chars().count();
                    snippet.line = Some(SourceLine {
                        origin: code.display_path(),
                        number: location.line,
                        text,
                        marker: (len > 0).then(|| location.char_range(len)),
                    });
                }
                None => {
                    snippet.position = Some(format!(
                        "at line {}, column {}",
                        location.line, location.column
                    ));
                }
            }
        }

        snippet.render()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.kind)?;
        if let Some(location) = self.location {
            write!(f, " (line {}, column {})", location.line, location.column)?;
        }
        Ok(())
    }
}
