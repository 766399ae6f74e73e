//! In-memory search indexes over a deduplicated [`ResourceTable`].
//!
//! Every index maps a key to the positions of the matching resources in the table. Position lists
//! preserve first-insertion order and never contain duplicates, so results are deterministic.
//!
//! [`ResourceTable`]: elixir_training_model::ResourceTable

mod date;
mod indexes;
mod keyword;
mod location;
mod postings;
mod provider;
mod stats;
mod tokenize;
mod topic;

pub use date::DateIndex;
pub use indexes::{IndexOptions, ResourceIndexes};
pub use keyword::KeywordIndex;
pub use location::{LocationFallback, LocationIndex};
pub use postings::Postings;
pub use provider::ProviderIndex;
pub use stats::DatasetStats;
pub use tokenize::tokenize;
pub use topic::TopicIndex;
