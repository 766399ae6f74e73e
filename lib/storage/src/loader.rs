use crate::error::{LoaderError, SourcePosition};
use crate::graph::SourceGraph;
use crate::source::{SourceLocation, SourceSpec};
use crate::union::UnionGraph;
use oxrdf::{NamedNode, Triple};
use oxrdfio::{RdfParseError, RdfParser};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::info;

const SOURCE_GRAPH_PREFIX: &str = "urn:elixir-training:source:";

/// Returns the named graph that holds the triples of the source with the given `label`.
pub fn source_graph_name(label: &str) -> Result<NamedNode, LoaderError> {
    let valid = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(LoaderError::InvalidLabel(label.to_owned()));
    }
    NamedNode::new(format!("{SOURCE_GRAPH_PREFIX}{label}"))
        .map_err(|_| LoaderError::InvalidLabel(label.to_owned()))
}

/// Loads all `sources`, in order, into a [`UnionGraph`].
///
/// The first unreadable or malformed source aborts the whole load.
pub fn load_sources(sources: &[SourceSpec]) -> Result<UnionGraph, LoaderError> {
    let mut labels = FxHashSet::default();
    let mut graphs = Vec::with_capacity(sources.len());
    for source in sources {
        if !labels.insert(source.label()) {
            return Err(LoaderError::DuplicateLabel(source.label().to_owned()));
        }
        graphs.push(load_source(source)?);
    }
    UnionGraph::new(graphs)
}

/// Parses a single source.
pub fn load_source(source: &SourceSpec) -> Result<SourceGraph, LoaderError> {
    let graph_name = source_graph_name(source.label())?;
    let reader: Box<dyn Read + '_> = match source.location() {
        SourceLocation::File(path) => {
            let file = File::open(path).map_err(|error| unreadable(source, error))?;
            Box::new(BufReader::new(file))
        }
        SourceLocation::Inline(content) => Box::new(content.as_bytes()),
    };

    let mut triples = Vec::new();
    let parser = RdfParser::from_format(source.format()).rename_blank_nodes();
    for quad in parser.for_reader(reader) {
        let quad = quad.map_err(|error| match error {
            RdfParseError::Io(error) => unreadable(source, error),
            RdfParseError::Syntax(error) => LoaderError::Parse {
                label: source.label().to_owned(),
                position: error.location().map(|range| SourcePosition {
                    line: range.start.line + 1,
                    column: range.start.column + 1,
                }),
                message: error.to_string(),
            },
        })?;
        triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
    }

    info!(
        source = source.label(),
        location = %source.location(),
        triples = triples.len(),
        "Loaded source"
    );
    Ok(SourceGraph::new(source.label(), graph_name, triples))
}

fn unreadable(source: &SourceSpec, error: std::io::Error) -> LoaderError {
    LoaderError::Unreadable {
        label: source.label().to_owned(),
        location: source.location().to_string(),
        error,
    }
}
