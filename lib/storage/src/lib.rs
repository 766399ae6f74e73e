//! Loading of harvested RDF sources into a provenance-aware union graph.
//!
//! Every source is parsed into its own [`SourceGraph`], which keeps the triples in document order
//! for the normalizer. All sources are additionally loaded into an in-memory triple store, each
//! into the named graph `urn:elixir-training:source:<label>`, so that ad-hoc SPARQL queries can
//! be passed through.

mod error;
mod graph;
mod loader;
mod prefixes;
mod source;
mod sparql;
mod union;

pub use error::{LoaderError, SourcePosition, SparqlError};
pub use graph::SourceGraph;
pub use loader::{load_source, load_sources, source_graph_name};
pub use prefixes::Prefixes;
pub use source::{SourceLocation, SourceSpec};
pub use sparql::QueryRows;
pub use union::UnionGraph;
