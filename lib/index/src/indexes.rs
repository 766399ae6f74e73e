use crate::date::DateIndex;
use crate::keyword::KeywordIndex;
use crate::location::LocationIndex;
use crate::provider::ProviderIndex;
use crate::topic::TopicIndex;
use elixir_training_model::ResourceTable;
use tracing::debug;

/// Tuning knobs of the index build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    /// Tokens shorter than this many characters are not indexed.
    pub min_token_length: usize,
    /// Number of distinct topics listed in the dataset statistics.
    pub topic_sample_size: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            topic_sample_size: 20,
        }
    }
}

/// The five lookup structures built over one [`ResourceTable`].
#[derive(Clone, Debug)]
pub struct ResourceIndexes {
    keyword: KeywordIndex,
    provider: ProviderIndex,
    location: LocationIndex,
    date: DateIndex,
    topic: TopicIndex,
}

impl ResourceIndexes {
    /// Builds all indexes in a single pass over `resources`.
    pub fn build(resources: &ResourceTable, options: &IndexOptions) -> Self {
        let mut keyword = KeywordIndex::new(options.min_token_length);
        let mut provider = ProviderIndex::new();
        let mut location = LocationIndex::new();
        let mut date = DateIndex::new();
        let mut topic = TopicIndex::new();

        for (position, resource) in resources.iter().enumerate() {
            keyword.insert(position, resource);
            provider.insert(position, resource);
            location.insert(position, resource);
            date.insert(position, resource);
            topic.insert(position, resource);
        }

        let indexes = Self {
            keyword,
            provider,
            location,
            date: date.finish(),
            topic,
        };
        debug!(
            tokens = indexes.keyword.len(),
            providers = indexes.provider.len(),
            countries = indexes.location.country_count(),
            dated_instances = indexes.date.len(),
            topics = indexes.topic.len(),
            "Built resource indexes"
        );
        indexes
    }

    pub fn keyword(&self) -> &KeywordIndex {
        &self.keyword
    }

    pub fn provider(&self) -> &ProviderIndex {
        &self.provider
    }

    pub fn location(&self) -> &LocationIndex {
        &self.location
    }

    pub fn date(&self) -> &DateIndex {
        &self.date
    }

    pub fn topic(&self) -> &TopicIndex {
        &self.topic
    }
}
