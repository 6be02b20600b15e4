#![forbid(unsafe_code)]

pub mod error;
pub mod game_service;
pub mod score_reporter;
pub mod wiki;

pub use wikigolf_core::Clock;

pub use error::FetchError;
pub use game_service::{GameService, GameUpdate};
pub use score_reporter::{ReportOutcome, ScoreReporter};
pub use wiki::{ArticleSource, ParsedArticle, WikiClient, WikiConfig, sanitize_article_html};

// UI-facing re-exports so the view layer does not need a direct storage
// dependency.
pub use storage::repository::{Identity, IdentityProvider, ScoreRecord, ScoreRepository};
