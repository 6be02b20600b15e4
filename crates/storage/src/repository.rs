use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use wikigolf_core::Clock;
use wikigolf_core::model::{GameResult, UserId};

use crate::supabase::SupabaseConfig;

/// Errors surfaced by storage and identity adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A score row as it is about to be written. The store assigns the
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreRecord {
    pub user_id: UserId,
    pub start_page: String,
    pub goal_page: String,
    pub click_count: u32,
}

impl NewScoreRecord {
    #[must_use]
    pub fn from_result(user_id: UserId, result: &GameResult) -> Self {
        Self {
            user_id,
            start_page: result.start_page().to_owned(),
            goal_page: result.goal_page().to_owned(),
            click_count: result.click_count(),
        }
    }
}

/// A persisted score row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub start_page: String,
    pub goal_page: String,
    pub click_count: u32,
    pub created_at: DateTime<Utc>,
}

/// The authenticated player, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub username: Option<String>,
}

/// Repository contract for game scores.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Persist one score row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_score(&self, record: NewScoreRecord) -> Result<(), StorageError>;

    /// Fetch the most recent scores for a player, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the rows cannot be read.
    async fn recent_scores(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError>;
}

/// Contract for resolving the current authenticated player.
///
/// `Ok(None)` means nobody is signed in; that is an ordinary state, not
/// an error.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for transport-level failures.
    async fn current_identity(&self) -> Result<Option<Identity>, StorageError>;
}

/// Simple in-memory score store for testing and offline play.
#[derive(Clone)]
pub struct InMemoryScoreRepository {
    clock: Clock,
    rows: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl InMemoryScoreRepository {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of rows currently stored, across all players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn insert_score(&self, record: NewScoreRecord) -> Result<(), StorageError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        rows.push(ScoreRecord {
            user_id: record.user_id,
            start_page: record.start_page,
            goal_page: record.goal_page,
            click_count: record.click_count,
            created_at: self.clock.now(),
        });
        Ok(())
    }

    async fn recent_scores(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        // Rows are appended in insertion order, which is chronological.
        let found: Vec<ScoreRecord> = rows
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(found)
    }
}

/// Identity provider with a fixed answer, for tests and offline play.
#[derive(Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, StorageError> {
        Ok(self.identity.clone())
    }
}

/// Aggregates the score store and identity provider behind trait objects
/// so the backend can be swapped without touching services.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl Storage {
    /// Process-local storage with nobody signed in. Scores are kept only
    /// for the lifetime of the process.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self {
            scores: Arc::new(InMemoryScoreRepository::new(clock)),
            identity: Arc::new(StaticIdentityProvider::signed_out()),
        }
    }

    /// Storage backed by a hosted Supabase project.
    #[must_use]
    pub fn supabase(config: SupabaseConfig) -> Self {
        Self {
            scores: Arc::new(crate::supabase::SupabaseScoreRepository::new(config.clone())),
            identity: Arc::new(crate::supabase::SupabaseIdentityProvider::new(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wikigolf_core::time::fixed_clock;

    fn record(user: UserId, clicks: u32) -> NewScoreRecord {
        NewScoreRecord {
            user_id: user,
            start_page: "ジーンズ".to_string(),
            goal_page: "紙".to_string(),
            click_count: clicks,
        }
    }

    #[tokio::test]
    async fn in_memory_round_trips_scores() {
        let repo = InMemoryScoreRepository::new(fixed_clock());
        let user = UserId::new(Uuid::from_u128(1));

        repo.insert_score(record(user, 3)).await.unwrap();

        let rows = repo.recent_scores(user, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].click_count, 3);
        assert_eq!(rows[0].start_page, "ジーンズ");
    }

    #[tokio::test]
    async fn recent_scores_only_returns_the_requested_player() {
        let repo = InMemoryScoreRepository::new(fixed_clock());
        let alice = UserId::new(Uuid::from_u128(1));
        let bob = UserId::new(Uuid::from_u128(2));

        repo.insert_score(record(alice, 3)).await.unwrap();
        repo.insert_score(record(bob, 9)).await.unwrap();

        let rows = repo.recent_scores(alice, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, alice);
    }

    #[tokio::test]
    async fn static_provider_reports_fixed_identity() {
        let user = UserId::new(Uuid::from_u128(7));
        let provider = StaticIdentityProvider::signed_in(Identity {
            id: user,
            username: Some("player".to_string()),
        });

        let identity = provider.current_identity().await.unwrap().unwrap();
        assert_eq!(identity.id, user);

        let none = StaticIdentityProvider::signed_out()
            .current_identity()
            .await
            .unwrap();
        assert!(none.is_none());
    }
}
