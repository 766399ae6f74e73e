//! Turns the union graph into deduplicated [`TrainingResource`] records.
//!
//! The [`Normalizer`] produces one candidate record per typed subject of every source. The
//! [`Deduplicator`] then groups the candidates by canonical id and keeps the richest one per group.
//!
//! [`TrainingResource`]: elixir_training_model::TrainingResource

mod canonical;
mod dedup;
mod extract;
mod properties;

pub use canonical::{canonical_id, synthetic_id, SYNTHETIC_ID_PREFIX};
pub use dedup::{richness_score, DedupOutcome, Deduplicator, SourcePriority};
pub use extract::Normalizer;
