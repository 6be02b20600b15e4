use std::sync::Arc;

use services::{GameService, IdentityProvider, ScoreRepository};

/// What the composition root must provide to the views.
pub trait UiApp: Send + Sync {
    fn game(&self) -> Arc<GameService>;
    fn scores(&self) -> Arc<dyn ScoreRepository>;
    fn identity(&self) -> Arc<dyn IdentityProvider>;
}

#[derive(Clone)]
pub struct AppContext {
    game: Arc<GameService>,
    scores: Arc<dyn ScoreRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            game: app.game(),
            scores: app.scores(),
            identity: app.identity(),
        }
    }

    #[must_use]
    pub fn game(&self) -> Arc<GameService> {
        Arc::clone(&self.game)
    }

    #[must_use]
    pub fn scores(&self) -> Arc<dyn ScoreRepository> {
        Arc::clone(&self.scores)
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
