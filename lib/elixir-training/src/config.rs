use elixir_training_index::{IndexOptions, LocationFallback};
use elixir_training_storage::{Prefixes, SourceSpec};

/// Everything needed to build a [`DataStore`](crate::DataStore).
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// The sources in load order.
    pub sources: Vec<SourceSpec>,
    /// Source labels in the order in which they win ties between equally rich duplicates.
    ///
    /// Sources that are not listed rank last. If empty, the load order decides.
    pub source_priority: Vec<String>,
    pub index: IndexOptions,
    /// How location searches behave when no instance matches the requested locality.
    pub location_fallback: LocationFallback,
    /// Prefixes that are bound in pass-through SPARQL queries.
    pub prefixes: Prefixes,
}

impl StoreConfig {
    pub fn new(sources: impl IntoIterator<Item = SourceSpec>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn with_source_priority<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.source_priority = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_index_options(mut self, options: IndexOptions) -> Self {
        self.index = options;
        self
    }

    #[must_use]
    pub fn with_location_fallback(mut self, fallback: LocationFallback) -> Self {
        self.location_fallback = fallback;
        self
    }

    #[must_use]
    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes = prefixes;
        self
    }
}
