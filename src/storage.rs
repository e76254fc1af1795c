//! Durable object storage for rendered card artifacts.
//!
//! Uploads go through the Supabase Storage HTTP API and are append-only:
//! a previously returned public URL is never overwritten, so every issuance
//! writes a fresh object and retries are safe end-to-end.

use anyhow::Context;
use async_trait::async_trait;
use std::env;
use thiserror::Error;

/// Errors surfaced by the artifact store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage rejected upload with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Abstraction over durable, publicly readable object storage.
#[async_trait]
pub trait ObjectStorage {
    /// Upload `data` at `path` and return the stable public URL.
    ///
    /// Implementations must never overwrite an existing object; callers
    /// guarantee path uniqueness per attempt.
    async fn upload(
        &self,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Public URL an uploaded object is served from.
    fn public_url(&self, path: &str) -> String;
}

/// Connection settings for the Supabase Storage API.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
    pub bucket: String,
}

impl SupabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let url = env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let api_key = env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
        let bucket = env::var("BUCKET_NAME").context("BUCKET_NAME must be set")?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        })
    }
}

/// Supabase-backed [`ObjectStorage`] implementation.
pub struct SupabaseStorage {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let endpoint = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, path
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            // append-only: a colliding path is an error, not an overwrite
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected { status, message });
        }

        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, path
        )
    }
}
