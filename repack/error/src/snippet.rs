//! Renders a [`Diagnostic`](crate::Diagnostic) with `annotate_snippets`
use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

use crate::Severity;

/// The source line a diagnostic points at
#[derive(Debug)]
pub(crate) struct SourceLine<'a> {
    /// The path of the file, as shown to the user
    pub origin: Option<String>,
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
    /// Character range of the marked token. Empty lines cannot be marked.
    pub marker: Option<(usize, usize)>,
}

/// Everything that is shown for one diagnostic
#[derive(Debug)]
pub(crate) struct DiagnosticSnippet<'a> {
    pub severity: Severity,
    pub id: &'static str,
    pub title: String,
    pub line: Option<SourceLine<'a>>,
    /// A location that could not be resolved to a source line
    pub position: Option<String>,
    pub hints: &'a [String],
}

impl DiagnosticSnippet<'_> {
    fn annotation_type(&self) -> AnnotationType {
        match self.severity {
            Severity::Error => AnnotationType::Error,
            Severity::Warning => AnnotationType::Warning,
        }
    }

    fn slice(&self) -> Option<Slice> {
        let annotation_type = self.annotation_type();
        self.line.as_ref().map(|line| Slice {
            source: line.text,
            line_start: line.number,
            origin: line.origin.as_deref(),
            annotations: line
                .marker
                .map(|range| SourceAnnotation {
                    range,
                    label: "",
                    annotation_type,
                })
                .into_iter()
                .collect(),
            fold: false,
        })
    }

    /// The unresolved position comes first, followed by one help line per hint
    fn footer(&self) -> Vec<Annotation> {
        let position = self.position.as_deref().map(|position| Annotation {
            annotation_type: AnnotationType::Note,
            id: None,
            label: Some(position),
        });
        let hints = self.hints.iter().map(|hint| Annotation {
            annotation_type: AnnotationType::Help,
            id: None,
            label: Some(hint),
        });
        position.into_iter().chain(hints).collect()
    }

    pub fn render(&self) -> String {
        let snippet = Snippet {
            title: Some(Annotation {
                annotation_type: self.annotation_type(),
                id: Some(self.id),
                label: Some(&self.title),
            }),
            slices: self.slice().into_iter().collect(),
            footer: self.footer(),
            opt: FormatOptions {
                color: crate::COLORED,
                ..Default::default()
            },
        };
        DisplayList::from(snippet).to_string()
    }
}
