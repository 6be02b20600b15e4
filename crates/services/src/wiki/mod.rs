//! Article retrieval from a MediaWiki content source.

mod client;
mod sanitize;

use async_trait::async_trait;

use crate::error::FetchError;

pub use client::{WikiClient, WikiConfig};
pub use sanitize::sanitize_article_html;

/// Rendered hypertext for one article, safe to inject into the content
/// region. The title is the resolved (post-redirect) title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArticle {
    pub title: String,
    pub html: String,
}

/// Contract for fetching rendered article content by title.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch parsed content for `title`, following source-side redirects.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for transport failures, non-success statuses
    /// and source-reported errors (missing pages included).
    async fn fetch_article(&self, title: &str) -> Result<ParsedArticle, FetchError>;
}
