use elixir_training_model::{OffsetDateTime, TrainingResource};
use rustc_hash::FxHashSet;

/// The start dates of all course instances in ascending order.
///
/// Range queries binary-search the bounds and never scan the whole sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateIndex {
    entries: Vec<(OffsetDateTime, usize)>,
}

impl DateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the start of every scheduled instance of `resource`.
    ///
    /// [`DateIndex::finish`] must be called after the last insertion.
    pub fn insert(&mut self, position: usize, resource: &TrainingResource) {
        self.entries.extend(
            resource
                .scheduled_instances()
                .filter_map(|instance| instance.start)
                .map(|start| (start, position)),
        );
    }

    /// Sorts the entries by start date, resources starting at the same time keep table order.
    #[must_use]
    pub fn finish(mut self) -> Self {
        self.entries.sort_unstable();
        self.entries.dedup();
        self
    }

    /// All entries starting within `[start, end]`. Missing bounds are open.
    pub fn range(
        &self,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> &[(OffsetDateTime, usize)] {
        let lower = start.map_or(0, |start| {
            self.entries.partition_point(|(date, _)| *date < start)
        });
        let upper = end.map_or(self.entries.len(), |end| {
            self.entries.partition_point(|(date, _)| *date <= end)
        });
        self.entries.get(lower..upper).unwrap_or_default()
    }

    /// The positions of resources with an instance starting within `[start, end]`.
    ///
    /// Resources are ordered by their earliest matching instance.
    pub fn positions(&self, start: Option<OffsetDateTime>, end: Option<OffsetDateTime>) -> Vec<usize> {
        let mut seen = FxHashSet::default();
        self.range(start, end)
            .iter()
            .map(|(_, position)| *position)
            .filter(|position| seen.insert(*position))
            .collect()
    }

    pub fn earliest(&self) -> Option<OffsetDateTime> {
        self.entries.first().map(|(date, _)| *date)
    }

    pub fn latest(&self) -> Option<OffsetDateTime> {
        self.entries.last().map(|(date, _)| *date)
    }

    /// Number of indexed instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
