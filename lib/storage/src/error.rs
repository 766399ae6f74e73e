use std::fmt::{Display, Formatter};
use std::io;

/// A position inside a source document. Lines and columns start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: u64,
    pub column: u64,
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// An error raised while loading the sources of a store.
///
/// All variants are fatal: a graph that was only partially loaded is never handed out.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The source could not be opened or read.
    #[error("Source '{label}' could not be read from {location}")]
    Unreadable {
        label: String,
        location: String,
        #[source]
        error: io::Error,
    },
    /// The source contains malformed RDF.
    #[error("Source '{label}' is not valid RDF{}: {message}", format_position(.position))]
    Parse {
        label: String,
        position: Option<SourcePosition>,
        message: String,
    },
    /// Two sources share the same label.
    #[error("The source label '{0}' is used more than once")]
    DuplicateLabel(String),
    /// The label cannot be used to build the provenance graph name.
    #[error("The source label '{0}' cannot be used in a graph name")]
    InvalidLabel(String),
    /// An error raised while filling the triple store.
    #[error(transparent)]
    Storage(#[from] oxigraph::store::StorageError),
}

impl LoaderError {
    /// The label of the source that failed, if the error is tied to one.
    pub fn source_label(&self) -> Option<&str> {
        match self {
            LoaderError::Unreadable { label, .. }
            | LoaderError::Parse { label, .. }
            | LoaderError::DuplicateLabel(label)
            | LoaderError::InvalidLabel(label) => Some(label),
            LoaderError::Storage(_) => None,
        }
    }
}

fn format_position(position: &Option<SourcePosition>) -> String {
    position
        .map(|position| format!(" at {position}"))
        .unwrap_or_default()
}

/// An error raised by an ad-hoc SPARQL query against the union graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SparqlError {
    #[error("Invalid SPARQL query: {message}")]
    Syntax { message: String },
    #[error("SPARQL evaluation failed: {message}")]
    Evaluation { message: String },
}

impl From<oxigraph::sparql::EvaluationError> for SparqlError {
    fn from(error: oxigraph::sparql::EvaluationError) -> Self {
        SparqlError::Evaluation {
            message: error.to_string(),
        }
    }
}
