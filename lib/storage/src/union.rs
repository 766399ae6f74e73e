use crate::error::{LoaderError, SparqlError};
use crate::graph::SourceGraph;
use crate::prefixes::Prefixes;
use crate::sparql::QueryRows;
use oxigraph::sparql::Query;
use oxigraph::store::Store;
use oxrdf::Quad;

/// The union of all loaded sources.
///
/// The per-source graphs are kept for the normalizer. The triple store answers ad-hoc queries;
/// its default graph is the union of all source graphs.
pub struct UnionGraph {
    sources: Vec<SourceGraph>,
    store: Store,
    prefixes: Prefixes,
}

impl UnionGraph {
    /// Loads all `sources` into a fresh in-memory triple store.
    pub fn new(sources: Vec<SourceGraph>) -> Result<Self, LoaderError> {
        let store = Store::new()?;
        for source in &sources {
            let graph_name = source.graph_name();
            store.extend(
                source
                    .triples()
                    .iter()
                    .map(|triple| {
                        Quad::new(
                            triple.subject.clone(),
                            triple.predicate.clone(),
                            triple.object.clone(),
                            graph_name.clone(),
                        )
                    }),
            )?;
        }
        Ok(Self {
            sources,
            store,
            prefixes: Prefixes::common(),
        })
    }

    /// Replaces the prefixes that are bound for ad-hoc queries.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// The per-source graphs in load order.
    pub fn sources(&self) -> &[SourceGraph] {
        &self.sources
    }

    pub fn source(&self, label: &str) -> Option<&SourceGraph> {
        self.sources.iter().find(|source| source.label() == label)
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    /// The total number of triples over all sources.
    pub fn triple_count(&self) -> usize {
        self.sources.iter().map(SourceGraph::len).sum()
    }

    /// Evaluates a SPARQL query against the union of all sources.
    ///
    /// Common vocabulary prefixes are bound unless the query declares them itself. Each source is
    /// also reachable as the named graph `urn:elixir-training:source:<label>`.
    pub fn query(&self, query: &str) -> Result<QueryRows, SparqlError> {
        let text = self.prefixes.apply_to_query(query);
        let mut query = Query::parse(&text, None).map_err(|error| SparqlError::Syntax {
            message: error.to_string(),
        })?;
        query.dataset_mut().set_default_graph_as_union();
        let results = self.store.query(query)?;
        QueryRows::collect(results)
    }
}

impl std::fmt::Debug for UnionGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionGraph")
            .field("sources", &self.sources.len())
            .field("triples", &self.triple_count())
            .finish_non_exhaustive()
    }
}
