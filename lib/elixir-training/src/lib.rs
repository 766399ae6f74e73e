#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod cache;
mod config;
mod error;
mod service;
mod store;
mod summary;

pub use cache::StoreCache;
pub use config::StoreConfig;
pub use error::{BuildError, QueryError};
pub use service::QueryService;
pub use store::DataStore;
pub use summary::{CourseInstanceSummary, ResourceSummary};

pub use elixir_training_index::{DatasetStats, IndexOptions, LocationFallback};
pub use elixir_training_storage::{LoaderError, Prefixes, QueryRows, SourceSpec, SparqlError};

pub mod model {
    pub use elixir_training_model::*;
}

pub mod index {
    pub use elixir_training_index::*;
}

pub mod normalizer {
    pub use elixir_training_normalizer::*;
}

pub mod storage {
    pub use elixir_training_storage::*;
}
