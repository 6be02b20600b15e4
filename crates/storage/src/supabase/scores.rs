use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use wikigolf_core::model::UserId;

use crate::repository::{NewScoreRecord, ScoreRecord, ScoreRepository, StorageError};
use crate::supabase::SupabaseConfig;

const SCORES_TABLE: &str = "scores";

/// Score store backed by Supabase PostgREST.
#[derive(Clone)]
pub struct SupabaseScoreRepository {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseScoreRepository {
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ScoreRepository for SupabaseScoreRepository {
    async fn insert_score(&self, record: NewScoreRecord) -> Result<(), StorageError> {
        let payload = ScoreInsertPayload::from_record(&record);
        let response = self
            .client
            .post(self.config.rest_url(SCORES_TABLE))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.config.bearer())
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_write_status(response.status())
    }

    async fn recent_scores(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError> {
        let response = self
            .client
            .get(self.config.rest_url(SCORES_TABLE))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.config.bearer())
            .query(&[
                ("select", "user_id,start_page,goal_page,click_count,created_at"),
                ("user_id", &format!("eq.{user_id}")),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_read_status(status));
        }

        let rows: Vec<ScoreRow> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(rows.into_iter().map(ScoreRow::into_record).collect())
    }
}

fn map_write_status(status: StatusCode) -> Result<(), StorageError> {
    if status.is_success() {
        return Ok(());
    }
    Err(map_read_status(status))
}

fn map_read_status(status: StatusCode) -> StorageError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        other => StorageError::Connection(format!("scores request failed with status {other}")),
    }
}

#[derive(Debug, Serialize)]
struct ScoreInsertPayload {
    user_id: UserId,
    start_page: String,
    goal_page: String,
    click_count: u32,
}

impl ScoreInsertPayload {
    fn from_record(record: &NewScoreRecord) -> Self {
        Self {
            user_id: record.user_id,
            start_page: record.start_page.clone(),
            goal_page: record.goal_page.clone(),
            click_count: record.click_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    user_id: UserId,
    start_page: String,
    goal_page: String,
    click_count: u32,
    created_at: DateTime<Utc>,
}

impl ScoreRow {
    fn into_record(self) -> ScoreRecord {
        ScoreRecord {
            user_id: self.user_id,
            start_page: self.start_page,
            goal_page: self.goal_page,
            click_count: self.click_count,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn insert_payload_matches_the_scores_table_shape() {
        let record = NewScoreRecord {
            user_id: UserId::new(Uuid::from_u128(1)),
            start_page: "ジーンズ".to_string(),
            goal_page: "紙".to_string(),
            click_count: 3,
        };
        let json = serde_json::to_value(ScoreInsertPayload::from_record(&record)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "00000000-0000-0000-0000-000000000001",
                "start_page": "ジーンズ",
                "goal_page": "紙",
                "click_count": 3,
            })
        );
    }

    #[test]
    fn score_rows_deserialize_from_postgrest_json() {
        let body = r#"[{
            "user_id": "00000000-0000-0000-0000-000000000001",
            "start_page": "ビール",
            "goal_page": "参勤交代",
            "click_count": 12,
            "created_at": "2024-05-01T12:00:00Z"
        }]"#;
        let rows: Vec<ScoreRow> = serde_json::from_str(body).unwrap();
        let record = rows.into_iter().next().unwrap().into_record();

        assert_eq!(record.click_count, 12);
        assert_eq!(record.goal_page, "参勤交代");
    }

    #[test]
    fn statuses_map_to_storage_errors() {
        assert!(matches!(
            map_read_status(StatusCode::UNAUTHORIZED),
            StorageError::Unauthorized
        ));
        assert!(matches!(
            map_read_status(StatusCode::NOT_FOUND),
            StorageError::NotFound
        ));
        assert!(matches!(
            map_read_status(StatusCode::INTERNAL_SERVER_ERROR),
            StorageError::Connection(_)
        ));
    }
}
