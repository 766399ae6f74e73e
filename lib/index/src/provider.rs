use crate::postings::Postings;
use elixir_training_model::{normalize_key, TrainingResource};

/// Exact-match index over normalized provider names.
#[derive(Clone, Debug, Default)]
pub struct ProviderIndex {
    postings: Postings,
}

impl ProviderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: usize, resource: &TrainingResource) {
        if let Some(name) = resource.provider_name() {
            let key = normalize_key(name);
            if !key.is_empty() {
                self.postings.insert(&key, position);
            }
        }
    }

    /// The positions of all resources offered by `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> &[usize] {
        self.postings.get(&normalize_key(name))
    }

    /// Number of distinct providers.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elixir_training_model::Organization;
    use time::macros::datetime;

    #[test]
    fn names_are_normalized() {
        let mut resource = TrainingResource::new(
            "https://example.org/course",
            "Course",
            "tess",
            datetime!(2025-06-01 00:00 UTC),
        );
        resource.provider = Some(Organization {
            name: "  Bioinformatics.ca ".to_owned(),
            identifier: None,
            url: None,
        });
        let mut index = ProviderIndex::new();
        index.insert(0, &resource);

        assert_eq!(index.get("bioinformatics.ca"), &[0]);
        assert_eq!(index.get("BIOINFORMATICS.CA"), &[0]);
        assert!(index.get("bioinformatics").is_empty());
    }
}
