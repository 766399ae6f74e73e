use crate::postings::Postings;
use elixir_training_model::vocab::trailing_segment;
use elixir_training_model::TrainingResource;

/// Indexes resources by topic, so that full IRIs and their short codes are interchangeable.
///
/// `http://edamontology.org/topic_3391` is reachable through the full IRI and through `topic_3391`.
#[derive(Clone, Debug, Default)]
pub struct TopicIndex {
    postings: Postings,
}

impl TopicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: usize, resource: &TrainingResource) {
        for topic in &resource.topics {
            let key = topic_key(topic);
            if key.is_empty() {
                continue;
            }
            if let Some(segment) = trailing_segment(&key) {
                self.postings.insert(segment, position);
            }
            self.postings.insert(&key, position);
        }
    }

    /// The positions of resources about `term`.
    ///
    /// The exact term is tried first, then its trailing segment if it is an IRI.
    pub fn get(&self, term: &str) -> &[usize] {
        let key = topic_key(term);
        let exact = self.postings.get(&key);
        if !exact.is_empty() {
            return exact;
        }
        trailing_segment(&key)
            .map(|segment| self.postings.get(segment))
            .unwrap_or_default()
    }

    /// Number of distinct keys, including short codes.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

fn topic_key(topic: &str) -> String {
    topic.trim().to_lowercase()
}
