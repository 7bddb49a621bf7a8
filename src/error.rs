//! Application-wide error types.
//!
//! Each subsystem has its own `thiserror` enum ([`EnrichmentError`],
//! [`FeedError`], [`ConfigError`]); this module folds them into one
//! [`Error`] for the pipeline. The CLI converts to `anyhow` at the edge.
//!
//! Every variant is fatal to the run. There is no retry or skip.
//!
//! [`EnrichmentError`]: crate::enrichment::EnrichmentError
//! [`FeedError`]: crate::feed::FeedError
//! [`ConfigError`]: crate::config::ConfigError

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog access error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Enrichment pass failed (and was rolled back)
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] crate::enrichment::EnrichmentError),

    /// Feed assembly or output failed
    #[error("Feed error: {0}")]
    Feed(#[from] crate::feed::FeedError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::enrichment::EnrichmentError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Enrichment(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::feed::FeedError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Feed(e).context(ctx))
    }
}
