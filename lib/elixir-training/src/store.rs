use crate::config::StoreConfig;
use elixir_training_index::{DatasetStats, LocationFallback, ResourceIndexes};
use elixir_training_model::{NormalizationReport, OffsetDateTime, ResourceTable, TrainingResource};
use elixir_training_normalizer::{Deduplicator, Normalizer, SourcePriority};
use elixir_training_storage::{load_sources, LoaderError, UnionGraph};
use std::time::Instant;
use tracing::info;

/// An immutable snapshot of the harvested training metadata.
///
/// A store bundles the union graph, the deduplicated resources, their indexes and the dataset
/// statistics. Nothing in it changes after [`DataStore::load`] returns, so it can be shared freely
/// between readers.
#[derive(Debug)]
pub struct DataStore {
    graph: UnionGraph,
    resources: ResourceTable,
    indexes: ResourceIndexes,
    stats: DatasetStats,
    report: NormalizationReport,
    location_fallback: LocationFallback,
    built_at: OffsetDateTime,
}

impl DataStore {
    /// Loads, normalizes, deduplicates and indexes all sources of `config`.
    ///
    /// Fails if any source cannot be read or parsed. Issues with single records are reported in
    /// the [statistics](Self::stats) instead.
    pub fn load(config: &StoreConfig) -> Result<Self, LoaderError> {
        let started = Instant::now();
        let built_at = OffsetDateTime::now_utc();

        let graph = load_sources(&config.sources)?.with_prefixes(config.prefixes.clone());
        let (candidates, report) = Normalizer::new(built_at).normalize(&graph);
        let priority = SourcePriority::new(config.source_priority.iter().cloned());
        let outcome = Deduplicator::new(priority).deduplicate(candidates);
        let indexes = ResourceIndexes::build(&outcome.resources, &config.index);
        let stats = DatasetStats::collect(
            &outcome.resources,
            &report,
            outcome.merged_groups,
            built_at,
            config.index.topic_sample_size,
        );

        info!(
            sources = graph.sources().len(),
            triples = graph.triple_count(),
            candidates = report.total_candidates(),
            resources = outcome.resources.len(),
            duplicates_merged = outcome.merged_groups,
            warnings = report.warnings().len(),
            elapsed = ?started.elapsed(),
            "Built data store"
        );

        Ok(Self {
            graph,
            resources: outcome.resources,
            indexes,
            stats,
            report,
            location_fallback: config.location_fallback,
            built_at,
        })
    }

    /// The deduplicated resources, ordered by the first appearance of their canonical id.
    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn resource(&self, id: &str) -> Option<&TrainingResource> {
        self.resources.get(id)
    }

    pub fn indexes(&self) -> &ResourceIndexes {
        &self.indexes
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    /// The warnings collected while normalizing.
    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }

    pub fn graph(&self) -> &UnionGraph {
        &self.graph
    }

    pub fn location_fallback(&self) -> LocationFallback {
        self.location_fallback
    }

    /// When the build of this snapshot started.
    pub fn built_at(&self) -> OffsetDateTime {
        self.built_at
    }
}
