mod ids;
mod links;
mod session;
mod theme;

pub use ids::{ParseUserIdError, UserId};
pub use links::{ARTICLE_PATH_PREFIX, link_target};
pub use session::{ClickOutcome, GamePhase, GameResult, LoadOutcome, NavigationStep, Session};
pub use theme::{Theme, ThemeCatalog, ThemeError};
