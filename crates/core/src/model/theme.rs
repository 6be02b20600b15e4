use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ThemeError {
    #[error("theme title must not be blank")]
    BlankTitle,

    #[error("theme start and goal must differ: {title}")]
    StartEqualsGoal { title: String },

    #[error("theme catalog must not be empty")]
    EmptyCatalog,
}

/// One round of the game: the article the player starts on and the
/// article they must reach. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    start: String,
    goal: String,
}

impl Theme {
    /// Builds a theme from a start and goal title.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::BlankTitle` if either title is blank, and
    /// `ThemeError::StartEqualsGoal` if the pair would be trivially won.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Result<Self, ThemeError> {
        let start = start.into();
        let goal = goal.into();
        if start.trim().is_empty() || goal.trim().is_empty() {
            return Err(ThemeError::BlankTitle);
        }
        if start == goal {
            return Err(ThemeError::StartEqualsGoal { title: start });
        }
        Ok(Self { start, goal })
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }
}

/// Fixed set of themes a session draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Builds a catalog from a list of themes.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::EmptyCatalog` when the list is empty.
    pub fn new(themes: Vec<Theme>) -> Result<Self, ThemeError> {
        if themes.is_empty() {
            return Err(ThemeError::EmptyCatalog);
        }
        Ok(Self { themes })
    }

    /// The built-in catalog the game shipped with, aimed at Japanese
    /// Wikipedia.
    ///
    /// # Panics
    ///
    /// Panics if a built-in pair fails validation, which would be a bug
    /// in the catalog itself.
    #[must_use]
    pub fn classic() -> Self {
        let pairs = [
            ("ジーンズ", "紙"),
            ("ビール", "参勤交代"),
            ("チョコレート", "歌舞伎"),
            ("江戸時代", "コンクリート"),
            ("忍者", "古代ローマ"),
            ("寿司", "相対性理論"),
            ("蒸気機関", "イヌ"),
            ("火薬", "電話"),
            ("恐竜", "ジャガイモ"),
            ("ピアノ", "アンデス山脈"),
            ("パンダ", "不思議の国のアリス"),
            ("南極", "モナ・リザ"),
            ("映画", "マヤ文明"),
        ];
        let themes = pairs
            .into_iter()
            .map(|(start, goal)| {
                Theme::new(start, goal).expect("built-in theme should be valid")
            })
            .collect();
        Self::new(themes).expect("built-in catalog should not be empty")
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_rejects_blank_titles() {
        assert_eq!(Theme::new("", "紙"), Err(ThemeError::BlankTitle));
        assert_eq!(Theme::new("ジーンズ", "  "), Err(ThemeError::BlankTitle));
    }

    #[test]
    fn theme_rejects_identical_start_and_goal() {
        let err = Theme::new("紙", "紙").unwrap_err();
        assert_eq!(
            err,
            ThemeError::StartEqualsGoal {
                title: "紙".to_string()
            }
        );
    }

    #[test]
    fn classic_catalog_has_thirteen_valid_pairs() {
        let catalog = ThemeCatalog::classic();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.get(0).unwrap().start(), "ジーンズ");
        assert_eq!(catalog.get(0).unwrap().goal(), "紙");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(ThemeCatalog::new(Vec::new()), Err(ThemeError::EmptyCatalog));
    }
}
