use std::sync::Arc;

use rand::Rng;

use wikigolf_core::model::{
    ClickOutcome, GameResult, LoadOutcome, NavigationStep, Session, ThemeCatalog,
};

use crate::score_reporter::ScoreReporter;
use crate::wiki::ArticleSource;

/// What the render surface should show after a game operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    /// Sanitized article HTML for the content region.
    Article { html: String },
    /// The session is over; show the win panel.
    Won { result: GameResult },
    /// The fetch failed; the session ended with this reason.
    Failed { message: String },
}

/// Drives a [`Session`] through theme selection, article loads, clicks
/// and score submission.
///
/// The service owns no session itself; the caller holds the single live
/// `Session` and passes it in, which keeps every transition synchronous
/// on the caller's event loop.
#[derive(Clone)]
pub struct GameService {
    themes: ThemeCatalog,
    articles: Arc<dyn ArticleSource>,
    reporter: Arc<ScoreReporter>,
}

impl GameService {
    #[must_use]
    pub fn new(
        themes: ThemeCatalog,
        articles: Arc<dyn ArticleSource>,
        reporter: Arc<ScoreReporter>,
    ) -> Self {
        Self {
            themes,
            articles,
            reporter,
        }
    }

    #[must_use]
    pub fn themes(&self) -> &ThemeCatalog {
        &self.themes
    }

    /// Starts a round on a uniformly random catalog theme and loads its
    /// start page.
    pub async fn start(&self, session: &mut Session) -> GameUpdate {
        let index = rand::rng().random_range(0..self.themes.len());
        let theme = self
            .themes
            .get(index)
            .expect("catalog index is always in range")
            .clone();
        tracing::info!(start = theme.start(), goal = theme.goal(), "starting round");
        let step = session.begin(&theme);
        self.advance(session, step).await
    }

    /// Offers a clicked href to the session. `None` means the click was
    /// not a game navigation and nothing changed.
    pub async fn follow_link(
        &self,
        session: &mut Session,
        href: Option<&str>,
    ) -> Option<GameUpdate> {
        match session.handle_click(href) {
            ClickOutcome::Ignored => None,
            ClickOutcome::Navigate(title) => Some(self.navigate(session, &title).await),
        }
    }

    /// Navigates the session to `title`, fetching content when needed.
    pub async fn navigate(&self, session: &mut Session, title: &str) -> GameUpdate {
        let step = session.request_navigation(title);
        self.advance(session, step).await
    }

    async fn advance(&self, session: &mut Session, step: NavigationStep) -> GameUpdate {
        let title = match step {
            NavigationStep::Won(result) => return self.finish(result),
            NavigationStep::Fetch(title) => title,
        };

        match self.articles.fetch_article(&title).await {
            Ok(article) => match session.content_loaded(&article.title) {
                LoadOutcome::Won(result) => self.finish(result),
                LoadOutcome::Playing => GameUpdate::Article { html: article.html },
            },
            Err(err) => {
                session.fetch_failed();
                tracing::warn!(%title, error = %err, "article fetch failed; session over");
                GameUpdate::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Terminal win handling: the score submission runs as a detached
    /// best-effort task so the win screen is never held up by it.
    fn finish(&self, result: GameResult) -> GameUpdate {
        let reporter = Arc::clone(&self.reporter);
        let submitted = result.clone();
        tokio::spawn(async move {
            reporter.report(&submitted).await;
        });
        GameUpdate::Won { result }
    }
}
