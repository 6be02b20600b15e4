use serde::{Deserialize, Serialize};

use crate::model::links::link_target;
use crate::model::theme::Theme;

/// Lifecycle of a game session.
///
/// `Idle` is the initial phase before any theme is chosen. `Loading`
/// covers an article fetch in flight, `Playing` means content is rendered
/// and the session is waiting for the next click. `Won` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Loading,
    Playing,
    Won,
    Failed,
}

/// Final outcome of a won session, handed to the score reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    start_page: String,
    goal_page: String,
    click_count: u32,
}

impl GameResult {
    #[must_use]
    pub fn start_page(&self) -> &str {
        &self.start_page
    }

    #[must_use]
    pub fn goal_page(&self) -> &str {
        &self.goal_page
    }

    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.click_count
    }
}

/// What the caller must do after a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationStep {
    /// Fetch content for this title and feed it back via
    /// [`Session::content_loaded`] or [`Session::fetch_failed`].
    Fetch(String),
    /// The requested title was the goal; the session is over.
    Won(GameResult),
}

/// Result of feeding fetched content back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content is ready to render; the session awaits the next click.
    Playing,
    /// A server-side redirect resolved onto the goal page.
    Won(GameResult),
}

/// Result of offering a clicked href to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a game navigation; the click passes through untouched.
    Ignored,
    /// A counted navigation to the decoded article title.
    Navigate(String),
}

/// The one live game session: start/goal/current titles, the click
/// counter and the phase. All transitions are synchronous and pure; the
/// returned [`NavigationStep`]/[`LoadOutcome`] values tell the caller
/// which asynchronous effect to run next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    start_page: String,
    goal_page: String,
    current_page: String,
    click_count: u32,
    phase: GamePhase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh idle session with no theme chosen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_page: String::new(),
            goal_page: String::new(),
            current_page: String::new(),
            click_count: 0,
            phase: GamePhase::Idle,
        }
    }

    /// Starts (or restarts) a round on the given theme.
    ///
    /// Resets the click counter and all titles, then requests navigation
    /// to the start page. Because a theme's start and goal always differ
    /// this yields a fetch step in practice.
    pub fn begin(&mut self, theme: &Theme) -> NavigationStep {
        self.start_page = theme.start().to_string();
        self.goal_page = theme.goal().to_string();
        self.current_page.clear();
        self.click_count = 0;
        self.phase = GamePhase::Loading;
        self.request_navigation(theme.start())
    }

    /// Moves the session to `title` and decides what happens next.
    ///
    /// The win check fires only while the session is running, so a won
    /// or failed session can never produce a second `Won` step.
    pub fn request_navigation(&mut self, title: &str) -> NavigationStep {
        self.current_page = title.to_string();
        if self.is_running() && self.current_page == self.goal_page {
            self.phase = GamePhase::Won;
            return NavigationStep::Won(self.result());
        }
        self.phase = GamePhase::Loading;
        NavigationStep::Fetch(self.current_page.clone())
    }

    /// Records that content for the pending fetch arrived, resolved (post
    /// any server-side redirect) as `resolved_title`.
    ///
    /// A redirect updates the current page and re-runs the win check
    /// once; redirect chains beyond the single resolved title the source
    /// reports are never followed. Content arriving when no fetch is
    /// pending (the session already won, failed or settled) is stale and
    /// leaves the session untouched, so a terminal phase can never
    /// produce a second result.
    pub fn content_loaded(&mut self, resolved_title: &str) -> LoadOutcome {
        if self.phase != GamePhase::Loading {
            return LoadOutcome::Playing;
        }
        self.phase = GamePhase::Playing;
        if resolved_title != self.current_page {
            self.current_page = resolved_title.to_string();
            if self.current_page == self.goal_page {
                self.phase = GamePhase::Won;
                return LoadOutcome::Won(self.result());
            }
        }
        LoadOutcome::Playing
    }

    /// Records that the pending fetch failed. The session ends; the
    /// click counter and theme are left as they were.
    pub fn fetch_failed(&mut self) {
        self.phase = GamePhase::Failed;
    }

    /// Offers a clicked href to the session.
    ///
    /// Ignored unless the session is in `Playing` (clicks are rejected
    /// while a fetch is in flight). A valid internal article link
    /// increments the click counter and yields the decoded target title;
    /// anything else is ignored without side effects.
    pub fn handle_click(&mut self, href: Option<&str>) -> ClickOutcome {
        if self.phase != GamePhase::Playing {
            return ClickOutcome::Ignored;
        }
        let Some(title) = href.and_then(link_target) else {
            return ClickOutcome::Ignored;
        };
        self.click_count += 1;
        ClickOutcome::Navigate(title)
    }

    #[must_use]
    pub fn start_page(&self) -> &str {
        &self.start_page
    }

    #[must_use]
    pub fn goal_page(&self) -> &str {
        &self.goal_page
    }

    #[must_use]
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// True between `begin` and a terminal transition.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Loading | GamePhase::Playing)
    }

    fn result(&self) -> GameResult {
        GameResult {
            start_page: self.start_page.clone(),
            goal_page: self.goal_page.clone(),
            click_count: self.click_count,
        }
    }
}
