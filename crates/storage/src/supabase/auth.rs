use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use wikigolf_core::model::UserId;

use crate::repository::{Identity, IdentityProvider, StorageError};
use crate::supabase::SupabaseConfig;

/// Resolves the current player through Supabase GoTrue.
///
/// Without a player access token there is nobody to resolve, so the
/// provider answers `None` without touching the network.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseIdentityProvider {
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, StorageError> {
        let Some(token) = self.config.access_token.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.config.auth_url("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match response.status() {
            // An expired or revoked token means "signed out", not a failure.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let user: UserResponse = response
                    .json()
                    .await
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(user.into_identity()))
            }
            status => Err(StorageError::Connection(format!(
                "user lookup failed with status {status}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: Option<String>,
}

impl UserResponse {
    fn into_identity(self) -> Identity {
        Identity {
            id: UserId::new(self.id),
            username: self.user_metadata.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_maps_to_identity() {
        let body = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "aud": "authenticated",
            "user_metadata": { "username": "player1" }
        }"#;
        let user: UserResponse = serde_json::from_str(body).unwrap();
        let identity = user.into_identity();

        assert_eq!(identity.id, UserId::new(Uuid::from_u128(7)));
        assert_eq!(identity.username.as_deref(), Some("player1"));
    }

    #[test]
    fn missing_metadata_still_resolves() {
        let body = r#"{ "id": "00000000-0000-0000-0000-000000000007" }"#;
        let user: UserResponse = serde_json::from_str(body).unwrap();
        assert!(user.into_identity().username.is_none());
    }
}
