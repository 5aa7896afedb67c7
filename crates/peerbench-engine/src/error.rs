use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The subject profile could not be located in the corpus.
    #[error("profile not found")]
    ProfileNotFound,

    /// A corpus or baseline-store call failed; surfaced as-is, never retried.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl EngineError {
    /// Wrap a storage-layer failure.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
