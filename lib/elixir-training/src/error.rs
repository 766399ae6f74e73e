use elixir_training_model::LiteralError;
use elixir_training_storage::{LoaderError, SparqlError};
use tokio::task::JoinError;

/// An error returned to the caller of a [`QueryService`](crate::QueryService) operation.
///
/// Query errors never affect the store, they only report malformed input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The pass-through SPARQL query could not be parsed or evaluated.
    #[error(transparent)]
    Sparql(#[from] SparqlError),
    /// A date bound is not an ISO 8601 date or date-time.
    #[error("Invalid date '{value}': {error}")]
    InvalidDate {
        value: String,
        #[source]
        error: LiteralError,
    },
}

/// An error raised while building a [`DataStore`](crate::DataStore).
///
/// No store is published if the build fails.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A source could not be read or parsed.
    #[error(transparent)]
    Loader(#[from] LoaderError),
    /// The build task panicked or was cancelled.
    #[error("The data store build was interrupted: {0}")]
    Interrupted(#[from] JoinError),
}
