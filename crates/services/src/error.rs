//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while fetching article content.
///
/// Any of these ends the running session; the message is what the player
/// sees on the failure screen.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The content source answered with its own error payload; the
    /// message is taken verbatim from the source.
    #[error("{0}")]
    Source(String),

    #[error("article request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    /// Fallback for a response that carries neither content nor an error
    /// message.
    #[must_use]
    pub fn missing_content(title: &str) -> Self {
        Self::Source(format!("could not load article \"{title}\""))
    }
}
