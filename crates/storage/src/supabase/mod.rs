//! Adapters for a hosted Supabase project: PostgREST for score rows and
//! GoTrue for the current user.

mod auth;
mod scores;

use std::env;

pub use auth::SupabaseIdentityProvider;
pub use scores::SupabaseScoreRepository;

/// Connection settings for one Supabase project.
///
/// The access token belongs to the signed-in player; when absent the
/// game runs unauthenticated and score submission is skipped upstream.
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub anon_key: String,
    pub access_token: Option<String>,
}

impl SupabaseConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Reads `WIKIGOLF_SUPABASE_URL`, `WIKIGOLF_SUPABASE_ANON_KEY` and the
    /// optional `WIKIGOLF_SUPABASE_ACCESS_TOKEN`. Returns `None` when the
    /// project is not configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("WIKIGOLF_SUPABASE_URL").ok()?;
        let anon_key = env::var("WIKIGOLF_SUPABASE_ANON_KEY").ok()?;
        if base_url.trim().is_empty() || anon_key.trim().is_empty() {
            return None;
        }
        let access_token = env::var("WIKIGOLF_SUPABASE_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        Some(Self {
            base_url,
            anon_key,
            access_token,
        })
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Bearer credential for REST calls: the player's token when signed
    /// in, the anon key otherwise.
    pub(crate) fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_without_duplicate_slashes() {
        let config = SupabaseConfig::new("https://proj.supabase.co/", "anon");
        assert_eq!(
            config.rest_url("scores"),
            "https://proj.supabase.co/rest/v1/scores"
        );
        assert_eq!(
            config.auth_url("user"),
            "https://proj.supabase.co/auth/v1/user"
        );
    }

    #[test]
    fn bearer_prefers_the_player_token() {
        let config = SupabaseConfig::new("https://proj.supabase.co", "anon");
        assert_eq!(config.bearer(), "anon");
        let config = config.with_access_token("jwt");
        assert_eq!(config.bearer(), "jwt");
    }
}
