use oxrdfio::RdfFormat;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the content of a source comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    /// A snapshot file written by a harvester.
    File(PathBuf),
    /// Content that is already in memory.
    Inline(Arc<str>),
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Inline(_) => f.write_str("<inline>"),
        }
    }
}

/// A labeled source of training metadata.
///
/// The label is used as provenance tag of every triple and every record of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    label: String,
    location: SourceLocation,
    format: RdfFormat,
}

impl SourceSpec {
    /// Creates a source backed by a file. The format is guessed from the extension and defaults to
    /// Turtle.
    pub fn file(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = guess_format(&path);
        Self {
            label: label.into(),
            location: SourceLocation::File(path),
            format,
        }
    }

    /// Creates a source from in-memory Turtle.
    pub fn inline(label: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            location: SourceLocation::Inline(content.into()),
            format: RdfFormat::Turtle,
        }
    }

    /// Overrides the serialization format of the source.
    #[must_use]
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = format;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }
}

fn guess_format(path: &Path) -> RdfFormat {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle)
}
