use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::store::StatusStore;
use crate::types::errors::StoreError;
use crate::types::status::{Account, Status};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Mastodon REST client bound to one authenticated account.
///
/// Covers exactly the three operations the sweeper needs plus credential
/// verification at startup; everything else about the API stays out of
/// scope.
pub struct MastodonClient {
    http: Client,
    base_url: String,
    access_token: String,
    account_id: String,
}

impl MastodonClient {
    /// Verifies the access token against `base_url` and binds the client to
    /// the authenticated account.
    pub async fn connect(base_url: &str, access_token: &str) -> Result<(Self, Account), StoreError> {
        let base_url: String = base_url.trim_end_matches('/').to_string();
        let url: String = format!("{base_url}/api/v1/accounts/verify_credentials");

        let http: Client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| StoreError::Http {
                url: url.clone(),
                source,
            })?;

        let response = http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|source| StoreError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                url,
                status: status.as_u16(),
                body,
            });
        }
        let account: Account = response
            .json()
            .await
            .map_err(|source| StoreError::Decode { url, source })?;

        let client = Self {
            http,
            base_url,
            access_token: access_token.to_string(),
            account_id: account.id.clone(),
        };
        Ok((client, account))
    }
}

#[async_trait]
impl StatusStore for MastodonClient {
    async fn tagged_statuses(
        &self,
        tag: &str,
        limit: u32,
        max_id: Option<&str>,
    ) -> Result<Vec<Status>, StoreError> {
        let url: String = format!(
            "{}/api/v1/accounts/{}/statuses",
            self.base_url, self.account_id
        );
        let mut query: Vec<(&str, String)> = vec![
            ("tagged", tag.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(max_id) = max_id {
            query.push(("max_id", max_id.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&query)
            .send()
            .await
            .map_err(|source| StoreError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                url,
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Vec<Status>>()
            .await
            .map_err(|source| StoreError::Decode { url, source })
    }

    async fn status(&self, id: &str) -> Result<Status, StoreError> {
        let url: String = format!("{}/api/v1/statuses/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|source| StoreError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                url,
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Status>()
            .await
            .map_err(|source| StoreError::Decode { url, source })
    }

    async fn delete_status(&self, id: &str) -> Result<(), StoreError> {
        let url: String = format!("{}/api/v1/statuses/{id}", self.base_url);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|source| StoreError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        // a status that is already gone counts as deleted
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body: String = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            url,
            status: status.as_u16(),
            body,
        })
    }
}
