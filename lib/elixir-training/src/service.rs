use crate::error::QueryError;
use crate::store::DataStore;
use crate::summary::ResourceSummary;
use elixir_training_index::DatasetStats;
use elixir_training_model::{parse_datetime, OffsetDateTime};
use elixir_training_storage::QueryRows;
use std::sync::Arc;
use time::macros::format_description;
use time::{Date, Duration};

/// Read-only operations over one [`DataStore`] snapshot.
///
/// A service keeps its snapshot alive, so a rebuild never affects results of a service that was
/// obtained before the swap. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct QueryService {
    store: Arc<DataStore>,
}

impl QueryService {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// The snapshot this service reads from.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    /// Resources matching at least one token of `query`.
    ///
    /// Resources matching more tokens come first. The query is tokenized like the indexed text, so
    /// matching is case-insensitive.
    pub fn search_by_keyword(&self, query: &str, limit: usize) -> Vec<ResourceSummary> {
        let positions = self.store.indexes().keyword().search(query);
        self.summaries(&positions, limit)
    }

    /// Resources whose provider name equals `name`, ignoring case and surrounding whitespace.
    pub fn search_by_provider(&self, name: &str, limit: usize) -> Vec<ResourceSummary> {
        let positions = self.store.indexes().provider().get(name);
        self.summaries(positions, limit)
    }

    /// Resources with an instance held in `country`, and in `locality` if one is given.
    ///
    /// If no instance matches the locality, the configured
    /// [`LocationFallback`](crate::LocationFallback) decides whether the country-level matches are
    /// returned.
    pub fn search_by_location(
        &self,
        country: &str,
        locality: Option<&str>,
        limit: usize,
    ) -> Vec<ResourceSummary> {
        let positions = self.store.indexes().location().get(
            country,
            locality,
            self.store.location_fallback(),
        );
        self.summaries(positions, limit)
    }

    /// Resources with an instance starting within `[start, end]`, ordered by start date.
    ///
    /// Missing bounds are open.
    pub fn search_by_date_range(
        &self,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
        limit: usize,
    ) -> Vec<ResourceSummary> {
        let positions = self.store.indexes().date().positions(start, end);
        self.summaries(&positions, limit)
    }

    /// Like [`Self::search_by_date_range`], with ISO 8601 bounds.
    ///
    /// A date-only end bound covers the whole day, or as much of it as is representable. Bounds
    /// without an offset are read as UTC.
    pub fn date_search(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ResourceSummary>, QueryError> {
        let start = start.map(parse_bound).transpose()?;
        let end = end
            .map(|end| -> Result<OffsetDateTime, QueryError> {
                let bound = parse_bound(end)?;
                Ok(if is_date_only(end) {
                    bound
                        .checked_add(Duration::DAY - Duration::NANOSECOND)
                        .unwrap_or(bound)
                } else {
                    bound
                })
            })
            .transpose()?;
        Ok(self.search_by_date_range(start, end, limit))
    }

    /// Resources about `term`, which is either a full topic IRI or its trailing segment.
    pub fn search_by_topic(&self, term: &str, limit: usize) -> Vec<ResourceSummary> {
        let positions = self.store.indexes().topic().get(term);
        self.summaries(positions, limit)
    }

    /// The resource with the canonical id `id`.
    pub fn resource(&self, id: &str) -> Option<ResourceSummary> {
        self.store.resource(id).map(ResourceSummary::from)
    }

    pub fn stats(&self) -> &DatasetStats {
        self.store.stats()
    }

    /// Evaluates a SPARQL query against the union of all sources.
    ///
    /// Common prefixes are bound when the query does not declare them.
    pub fn execute_query(&self, query: &str) -> Result<QueryRows, QueryError> {
        Ok(self.store.graph().query(query)?)
    }

    fn summaries(&self, positions: &[usize], limit: usize) -> Vec<ResourceSummary> {
        let resources = self.store.resources();
        positions
            .iter()
            .take(limit)
            .filter_map(|position| resources.at(*position))
            .map(ResourceSummary::from)
            .collect()
    }
}

fn parse_bound(value: &str) -> Result<OffsetDateTime, QueryError> {
    parse_datetime(value).map_err(|error| QueryError::InvalidDate {
        value: value.to_owned(),
        error,
    })
}

fn is_date_only(value: &str) -> bool {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);
    Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
}
