use elixir_training_model::{
    format_datetime, NormalizationReport, OffsetDateTime, ResourceTable,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate figures about one build of the dataset.
///
/// Besides the content distribution, the record surfaces data-quality issues found while
/// normalizing, so that they can be fed back to the providers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// When the sources were loaded, formatted as RFC 3339.
    pub loaded_at: String,
    pub total_resources: usize,
    pub total_candidates: usize,
    /// Candidate records per source, before deduplication.
    pub candidates_per_source: BTreeMap<String, usize>,
    /// Retained records per source of the winning candidate.
    pub resources_per_source: BTreeMap<String, usize>,
    pub type_distribution: BTreeMap<String, usize>,
    pub access_modes: BTreeMap<String, usize>,
    pub audience_roles: BTreeMap<String, usize>,
    /// The first distinct topics in table order.
    pub topic_samples: Vec<String>,
    pub course_instances: usize,
    pub dropped_records: usize,
    /// Number of canonical ids that were described by more than one candidate.
    pub duplicates_merged: usize,
    pub normalization_warnings: BTreeMap<String, usize>,
}

impl DatasetStats {
    pub fn collect(
        resources: &ResourceTable,
        report: &NormalizationReport,
        duplicates_merged: usize,
        loaded_at: OffsetDateTime,
        topic_sample_size: usize,
    ) -> Self {
        let mut resources_per_source = BTreeMap::new();
        let mut type_distribution = BTreeMap::new();
        let mut access_modes = BTreeMap::new();
        let mut audience_roles = BTreeMap::new();
        let mut topic_samples: Vec<String> = Vec::new();
        let mut course_instances = 0;

        for resource in resources {
            increment(&mut resources_per_source, &resource.source);
            for resource_type in &resource.resource_types {
                increment(&mut type_distribution, resource_type);
            }
            for mode in &resource.accessibility.access_modes {
                increment(&mut access_modes, mode);
            }
            for role in &resource.audience_roles {
                increment(&mut audience_roles, role);
            }
            for topic in &resource.topics {
                if topic_samples.len() < topic_sample_size && !topic_samples.contains(topic) {
                    topic_samples.push(topic.clone());
                }
            }
            course_instances += resource.course_instances.len();
        }

        Self {
            loaded_at: format_datetime(loaded_at),
            total_resources: resources.len(),
            total_candidates: report.total_candidates(),
            candidates_per_source: report.candidates_per_source().clone(),
            resources_per_source,
            type_distribution,
            access_modes,
            audience_roles,
            topic_samples,
            course_instances,
            dropped_records: report.dropped_records(),
            duplicates_merged,
            normalization_warnings: report.warning_counts(),
        }
    }
}

fn increment(counts: &mut BTreeMap<String, usize>, key: &str) {
    match counts.get_mut(key) {
        Some(count) => *count += 1,
        None => {
            counts.insert(key.to_owned(), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elixir_training_model::TrainingResource;
    use time::macros::datetime;

    fn resource(id: &str, source: &str, types: &[&str], topics: &[&str]) -> TrainingResource {
        let mut resource = TrainingResource::new(id, id, source, datetime!(2025-06-01 00:00 UTC));
        resource.resource_types = types.iter().map(|t| (*t).to_owned()).collect();
        resource.topics = topics.iter().map(|t| (*t).to_owned()).collect();
        resource.accessibility.access_modes = vec!["textual".to_owned()];
        resource
    }

    #[test]
    fn collects_distributions() {
        let table = [
            resource("a", "tess", &["Course"], &["topic_3391", "topic_0092"]),
            resource("b", "gtn", &["LearningResource"], &["topic_3391", "topic_3174"]),
            resource("c", "tess", &["Course", "Event"], &[]),
        ]
        .into_iter()
        .collect::<ResourceTable>();
        let mut report = NormalizationReport::new();
        report.add_candidates("tess", 3);
        report.add_candidates("gtn", 1);

        let stats = DatasetStats::collect(&table, &report, 1, datetime!(2025-06-01 00:00 UTC), 2);
        insta::assert_json_snapshot!(stats, @r#"
        {
          "loaded_at": "2025-06-01T00:00:00Z",
          "total_resources": 3,
          "total_candidates": 4,
          "candidates_per_source": {
            "gtn": 1,
            "tess": 3
          },
          "resources_per_source": {
            "gtn": 1,
            "tess": 2
          },
          "type_distribution": {
            "Course": 2,
            "Event": 1,
            "LearningResource": 1
          },
          "access_modes": {
            "textual": 3
          },
          "audience_roles": {},
          "topic_samples": [
            "topic_3391",
            "topic_0092"
          ],
          "course_instances": 0,
          "dropped_records": 0,
          "duplicates_merged": 1,
          "normalization_warnings": {}
        }
        "#);
    }
}
