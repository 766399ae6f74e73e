use elixir_training_model::{ResourceTable, TrainingResource};
use rustc_hash::FxHashMap;
use std::cmp::{Ordering, Reverse};
use tracing::debug;

const IDENTIFIER_WEIGHT: u32 = 16;
const TEMPORAL_WEIGHT: u32 = 4;
const LOCATION_WEIGHT: u32 = 4;
const DESCRIPTIVE_WEIGHT: u32 = 2;
const TERM_WEIGHT: u32 = 1;
/// Keyword and topic counts stop contributing beyond this many terms.
const MAX_SCORED_TERMS: u32 = 8;

/// Computes how complete a candidate record is.
///
/// Persistent identifiers weigh most, followed by temporal and location fields, descriptive text
/// and finally the number of keywords and topics.
pub fn richness_score(resource: &TrainingResource) -> u32 {
    let mut score = 0;
    if resource.has_persistent_identifier() {
        score += IDENTIFIER_WEIGHT;
    }

    let instances = &resource.course_instances;
    let temporal = [
        instances.iter().any(|instance| instance.start.is_some()),
        instances.iter().any(|instance| instance.end.is_some()),
        resource.date_published.is_some(),
        resource.date_modified.is_some(),
    ];
    score += TEMPORAL_WEIGHT * count(&temporal);

    let located = instances.iter().any(|instance| instance.location.is_some());
    score += LOCATION_WEIGHT * u32::from(located);

    let descriptive = [
        resource.description.is_some(),
        resource.abstract_text.is_some(),
        resource.headline.is_some(),
        resource.url.is_some(),
        resource.provider.is_some(),
        resource.language.is_some(),
        resource.license.is_some(),
    ];
    score += DESCRIPTIVE_WEIGHT * count(&descriptive);

    let terms = u32::try_from(resource.keywords.len() + resource.topics.len()).unwrap_or(u32::MAX);
    score + TERM_WEIGHT * terms.min(MAX_SCORED_TERMS)
}

fn count(flags: &[bool]) -> u32 {
    flags.iter().map(|flag| u32::from(*flag)).sum()
}

/// A fixed ranking of source labels used to break ties between equally rich candidates.
///
/// Sources that are not listed rank after all listed ones, in load order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourcePriority {
    labels: Vec<String>,
}

impl SourcePriority {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The rank of `label`. Lower ranks win.
    pub fn rank(&self, label: &str) -> usize {
        self.labels
            .iter()
            .position(|known| known == label)
            .unwrap_or(self.labels.len())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// The deduplicated records together with counters for the dataset statistics.
#[derive(Clone, Debug)]
pub struct DedupOutcome {
    /// One record per canonical id, ordered by the first appearance of the id.
    pub resources: ResourceTable,
    /// Number of canonical ids that had more than one candidate.
    pub merged_groups: usize,
    /// Number of candidates that were folded into a winner.
    pub discarded: usize,
}

/// Selects a single record per canonical id.
#[derive(Clone, Debug, Default)]
pub struct Deduplicator {
    priority: SourcePriority,
}

impl Deduplicator {
    pub fn new(priority: SourcePriority) -> Self {
        Self { priority }
    }

    /// Groups `candidates` by id and keeps the richest candidate of every group.
    ///
    /// Ties are broken by the presence of a persistent identifier, then by the source priority
    /// and finally by candidate order. Keywords and topics of the other candidates are added to the
    /// winner.
    pub fn deduplicate(&self, candidates: Vec<TrainingResource>) -> DedupOutcome {
        let mut groups: Vec<Vec<TrainingResource>> = Vec::new();
        let mut group_of: FxHashMap<String, usize> = FxHashMap::default();
        for candidate in candidates {
            match group_of.get(&candidate.id) {
                Some(group) => groups[*group].push(candidate),
                None => {
                    group_of.insert(candidate.id.clone(), groups.len());
                    groups.push(vec![candidate]);
                }
            }
        }

        let mut merged_groups = 0;
        let mut discarded = 0;
        let resources = groups
            .into_iter()
            .map(|group| {
                if group.len() > 1 {
                    merged_groups += 1;
                    discarded += group.len() - 1;
                }
                self.merge(group)
            })
            .collect::<ResourceTable>();

        DedupOutcome {
            resources,
            merged_groups,
            discarded,
        }
    }

    fn merge(&self, group: Vec<TrainingResource>) -> TrainingResource {
        let winner = group
            .iter()
            .enumerate()
            .max_by(|(left_index, left), (right_index, right)| {
                self.compare(left, right)
                    .then_with(|| Reverse(left_index).cmp(&Reverse(right_index)))
            })
            .map_or(0, |(index, _)| index);

        let mut others = group;
        let mut merged = others.remove(winner);
        if !others.is_empty() {
            debug!(
                id = %merged.id,
                winner = %merged.source,
                candidates = others.len() + 1,
                "Merged duplicate resources"
            );
        }
        for other in others {
            enrich(&mut merged, other);
        }
        merged
    }

    /// Orders candidates so that the better one compares greater.
    fn compare(&self, left: &TrainingResource, right: &TrainingResource) -> Ordering {
        richness_score(left)
            .cmp(&richness_score(right))
            .then_with(|| {
                left.has_persistent_identifier()
                    .cmp(&right.has_persistent_identifier())
            })
            .then_with(|| {
                Reverse(self.priority.rank(&left.source))
                    .cmp(&Reverse(self.priority.rank(&right.source)))
            })
    }
}

/// Unions the keywords and topics of `other` into `winner`, keeping the winner's order.
fn enrich(winner: &mut TrainingResource, other: TrainingResource) {
    for keyword in other.keywords {
        if !winner
            .keywords
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&keyword))
        {
            winner.keywords.push(keyword);
        }
    }
    for topic in other.topics {
        if !winner.topics.contains(&topic) {
            winner.topics.push(topic);
        }
    }
}
