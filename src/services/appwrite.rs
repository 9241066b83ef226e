use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::UserProfile;
use crate::services::store::{dedupe_by_id, ProfileStore, StoreError};

/// Page size used when walking the profile collection
const PAGE_SIZE: usize = 100;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Reads student profiles from the Appwrite documents API:
/// - Listing the full roster, page by page
/// - Fetching a single viewer profile
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        timeout: Duration,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.user_profiles
        )
    }

    async fn list_documents(&self, queries: &[String]) -> Result<Value, AppwriteError> {
        let query_string = queries
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.documents_url(), query_string);

        tracing::debug!("Listing profile documents: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Appwrite list failed: {} - {}", status, body);
            return Err(AppwriteError::ApiError(format!("Failed to list profiles: {}", status)));
        }

        Ok(response.json().await?)
    }

    /// Fetch every profile in the collection, in collection order
    pub async fn get_all_profiles(&self) -> Result<Vec<UserProfile>, AppwriteError> {
        let mut profiles = Vec::new();
        let mut offset = 0usize;

        loop {
            let queries = vec![
                format!("limit({})", PAGE_SIZE),
                format!("offset({})", offset),
            ];
            let json = self.list_documents(&queries).await?;
            let documents = documents_of(&json)?;
            let page_len = documents.len();

            profiles.extend(documents.iter().filter_map(parse_profile));

            // `total` is optional; a short page always ends the walk
            let total = json.get("total").and_then(|t| t.as_u64()).map(|t| t as usize);
            offset += page_len;
            if page_len < PAGE_SIZE || total.is_some_and(|total| offset >= total) {
                break;
            }
        }

        tracing::debug!("Fetched {} profiles from Appwrite", profiles.len());
        Ok(dedupe_by_id(profiles))
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppwriteError> {
        let queries = vec![
            format!("equal(\"uid\", [\"{}\"])", user_id.replace('"', "\\\"")),
            "limit(1)".to_string(),
        ];

        tracing::debug!("Fetching profile for user: {}", user_id);

        let json = self.list_documents(&queries).await?;
        if let Some(profile) = documents_of(&json)?.first().and_then(parse_profile) {
            return Ok(Some(profile));
        }

        // Documents without a `uid` are keyed by their `$id` in the roster
        let profile = self
            .get_document(user_id)
            .await?
            .as_ref()
            .and_then(parse_profile)
            .filter(|profile| profile.id == user_id);

        if profile.is_none() {
            tracing::debug!("No profile document for user {}", user_id);
        }
        Ok(profile)
    }

    /// Fetch one document by its `$id`, `None` on 404
    async fn get_document(&self, document_id: &str) -> Result<Option<Value>, AppwriteError> {
        let url = format!("{}/{}", self.documents_url(), urlencoding::encode(document_id));

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            tracing::error!("Appwrite document fetch failed: {}", status);
            return Err(AppwriteError::ApiError(format!("Failed to get document: {}", status)));
        }

        Ok(Some(response.json().await?))
    }
}

fn documents_of(json: &Value) -> Result<&Vec<Value>, AppwriteError> {
    json.get("documents")
        .and_then(|d| d.as_array())
        .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))
}

/// Profile fields may sit at the top level or under `data`; the document `$id`
/// stands in for a missing `uid`.
fn parse_profile(doc: &Value) -> Option<UserProfile> {
    let mut data = doc.get("data").unwrap_or(doc).clone();

    if let Some(obj) = data.as_object_mut() {
        if !["uid", "id", "userId"].iter().any(|k| obj.contains_key(*k)) {
            if let Some(id) = doc.get("$id").cloned() {
                obj.insert("uid".to_string(), id);
            }
        }
    }

    match serde_json::from_value(data) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!("Skipping malformed profile document: {}", e);
            None
        }
    }
}

#[async_trait]
impl ProfileStore for AppwriteClient {
    async fn fetch_all_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.get_all_profiles().await?)
    }

    async fn fetch_viewer_profile(&self, identity: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.get_profile(identity).await?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let queries = vec!["limit(1)".to_string()];
        Ok(self.list_documents(&queries).await.is_ok())
    }
}
