//! Database module - AppState and application-record operations
//!
//! `AppState` owns the connection pool, the shared HTTP client, the object
//! storage handle, the verification lookup cache, and the card issuer.
//! Query implementations live in the `application` submodule.

mod application;

use moka::future::Cache;
use sqlx::PgPool;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::application::models::ApplicationRecord;
use crate::card::{CardIssuer, IssuerConfig};
use crate::storage::{ObjectStorage, SupabaseConfig, SupabaseStorage};

/// Verification lookups are cached briefly; `verified_at` is still computed
/// per request, so only the underlying record can be up to this stale.
const VERIFICATION_CACHE_TTL_SECS: u64 = 60;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub verification_cache: Cache<String, ApplicationRecord>,
    pub http_client: reqwest::Client,
    pub storage: Arc<dyn ObjectStorage + Send + Sync>,
    pub issuer: Arc<CardIssuer>,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let supabase_config = SupabaseConfig::from_env()?;
        let issuer_config = IssuerConfig::from_env()?;
        Self::new_with_config(supabase_config, issuer_config).await
    }

    pub async fn new_with_config(
        supabase_config: SupabaseConfig,
        issuer_config: IssuerConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let database_url =
            env::var("SUPABASE_DATABASE_URL").expect("SUPABASE_DATABASE_URL must be set");

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(100)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .max_lifetime(Duration::from_secs(1800))
            .connect(&database_url)
            .await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent("evoter-server/0.3")
            .build()
            .expect("Failed to create reqwest client");

        let storage: Arc<dyn ObjectStorage + Send + Sync> =
            Arc::new(SupabaseStorage::new(supabase_config, http_client.clone()));

        Ok(Self::assemble(pool, http_client, storage, issuer_config))
    }

    /// Test-friendly constructor: caller supplies the pool and storage.
    pub fn new_with_pool_and_storage(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        issuer_config: IssuerConfig,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("evoter-server/0.3")
            .build()
            .expect("Failed to create reqwest client");
        Self::assemble(pool, http_client, storage, issuer_config)
    }

    fn assemble(
        pool: PgPool,
        http_client: reqwest::Client,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        issuer_config: IssuerConfig,
    ) -> Self {
        let verification_cache = Cache::builder()
            .time_to_live(Duration::from_secs(VERIFICATION_CACHE_TTL_SECS))
            .max_capacity(10_000)
            .build();

        let issuer = Arc::new(CardIssuer::new(
            storage.clone(),
            http_client.clone(),
            issuer_config,
        ));

        AppState {
            pool,
            verification_cache,
            http_client,
            storage,
            issuer,
        }
    }
}
