use crate::postings::Postings;
use crate::tokenize::tokenize;
use elixir_training_model::TrainingResource;
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Full-text index over the descriptive fields of the resources.
#[derive(Clone, Debug)]
pub struct KeywordIndex {
    postings: Postings,
    min_token_length: usize,
}

impl KeywordIndex {
    pub fn new(min_token_length: usize) -> Self {
        Self {
            postings: Postings::new(),
            min_token_length,
        }
    }

    /// Adds the tokens of `resource`, found at `position` in the resource table.
    pub fn insert(&mut self, position: usize, resource: &TrainingResource) {
        let fields = [
            Some(&resource.name),
            resource.description.as_ref(),
            resource.abstract_text.as_ref(),
            resource.headline.as_ref(),
            resource.language.as_ref(),
            resource.interactivity_type.as_ref(),
        ]
        .into_iter()
        .flatten()
        .chain(&resource.keywords)
        .chain(&resource.prerequisites)
        .chain(&resource.teaches)
        .chain(&resource.learning_resource_types)
        .chain(&resource.educational_levels);

        for field in fields {
            for token in tokenize(field, self.min_token_length) {
                self.postings.insert(&token, position);
            }
        }
    }

    /// Returns the positions of all resources matching at least one token of `query`.
    ///
    /// Resources matching more distinct tokens come first, ties keep table order.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let mut matches: FxHashMap<usize, usize> = FxHashMap::default();
        for token in tokenize(query, self.min_token_length).unique() {
            for position in self.postings.get(&token) {
                *matches.entry(*position).or_default() += 1;
            }
        }
        matches
            .into_iter()
            .sorted_unstable_by(|(left, left_count), (right, right_count)| {
                right_count.cmp(left_count).then(left.cmp(right))
            })
            .map(|(position, _)| position)
            .collect()
    }

    /// The positions of a single, already tokenized term.
    pub fn token(&self, token: &str) -> &[usize] {
        self.postings.get(token)
    }

    pub fn min_token_length(&self) -> usize {
        self.min_token_length
    }

    /// Number of distinct tokens.
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
    use time::macros::datetime;

    fn resource(name: &str, keywords: &[&str]) -> TrainingResource {
        let mut resource = TrainingResource::new(
            format!("https://example.org/{name}"),
            name,
            "tess",
            datetime!(2025-06-01 00:00 UTC),
        );
        resource.keywords = keywords.iter().map(|k| (*k).to_owned()).collect();
        resource
    }

    fn index() -> KeywordIndex {
        let mut index = KeywordIndex::new(2);
        index.insert(0, &resource("Python basics", &["programming"]));
        index.insert(1, &resource("FAIR data in Python", &["FAIR", "python"]));
        index.insert(2, &resource("Genome assembly", &["FAIR"]));
        index
    }

    #[test]
    fn tokens_are_case_insensitive() {
        let index = index();
        assert_eq!(index.search("PYTHON"), vec![0, 1]);
        assert_eq!(index.search("python"), index.search("Python"));
        assert_eq!(index.token("python"), &[0, 1]);
    }

    #[test]
    fn ranks_by_match_count_then_position() {
        assert_eq!(index().search("fair python"), vec![1, 0, 2]);
    }

    #[test]
    fn language_and_interactivity_type_are_searchable() {
        let mut course = resource("Genome assembly", &[]);
        course.language = Some("English".to_owned());
        course.interactivity_type = Some("mixed".to_owned());
        let mut index = index();
        index.insert(3, &course);

        assert_eq!(index.search("english"), vec![3]);
        assert_eq!(index.search("Mixed"), vec![3]);
    }

    #[test]
    fn short_and_unknown_tokens_match_nothing() {
        let index = index();
        assert!(index.search("a").is_empty());
        assert!(index.search("proteomics").is_empty());
        assert!(index.search("").is_empty());
    }
}
