use std::sync::Arc;

use storage::repository::{IdentityProvider, NewScoreRecord, ScoreRepository};
use wikigolf_core::model::GameResult;

/// How a score submission attempt ended. Callers may ignore this; every
/// path is already logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Saved,
    SkippedUnauthenticated,
    Failed,
}

/// Submits won-game results under the current identity.
///
/// Submission is strictly best-effort: an unresolved identity skips the
/// write, and a failed write is logged and swallowed. Nothing here can
/// affect the session that already finished.
#[derive(Clone)]
pub struct ScoreReporter {
    identity: Arc<dyn IdentityProvider>,
    scores: Arc<dyn ScoreRepository>,
}

impl ScoreReporter {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, scores: Arc<dyn ScoreRepository>) -> Self {
        Self { identity, scores }
    }

    /// Persist one result for the current player, if any.
    pub async fn report(&self, result: &GameResult) -> ReportOutcome {
        let identity = match self.identity.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                tracing::warn!("nobody is signed in; skipping score submission");
                return ReportOutcome::SkippedUnauthenticated;
            }
            Err(err) => {
                tracing::warn!(error = %err, "identity lookup failed; skipping score submission");
                return ReportOutcome::SkippedUnauthenticated;
            }
        };

        let record = NewScoreRecord::from_result(identity.id, result);
        match self.scores.insert_score(record).await {
            Ok(()) => {
                tracing::info!(
                    user = %identity.id,
                    clicks = result.click_count(),
                    "score saved"
                );
                ReportOutcome::Saved
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save score");
                ReportOutcome::Failed
            }
        }
    }
}
