//! End-to-end card issuance pipeline.
//!
//! One issuance is one independent run of
//! validate -> build URL -> encode QR -> render -> upload -> persist
//! location. Nothing is persisted before the upload succeeds, and nothing is
//! retried here; callers retry the whole pipeline, which is safe because
//! every attempt uploads to a fresh path.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use prometheus::{register_int_counter, IntCounter};
use std::env;
use std::sync::Arc;
use uuid::Uuid;

use super::models::VoterCardRequest;
use super::qr::{encode_verification_qr, verification_url};
use super::renderer::render_card;
use super::{CardError, IssuedCard};
use crate::storage::ObjectStorage;

lazy_static! {
    static ref CARDS_ISSUED: IntCounter = register_int_counter!(
        "evoter_cards_issued_total",
        "Voter cards successfully issued"
    )
    .unwrap();
    static ref CARD_ISSUE_FAILURES: IntCounter = register_int_counter!(
        "evoter_card_issue_failures_total",
        "Voter card issuance attempts that failed"
    )
    .unwrap();
}

/// Issuance settings.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Public origin the verification URL is built from.
    pub public_origin: String,
    /// When true (the default), every download runs the full pipeline again
    /// instead of trusting a previously stored URL. Guarantees holders always
    /// get the current card design at the cost of extra compute.
    pub always_regenerate: bool,
}

impl IssuerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let public_origin = env::var("PUBLIC_ORIGIN").context("PUBLIC_ORIGIN must be set")?;
        let always_regenerate = env::var("ALWAYS_REGENERATE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        Ok(Self {
            public_origin,
            always_regenerate,
        })
    }
}

/// Seam for the final persistence step: writing the artifact location back
/// onto the owning application record. Last-writer-wins; concurrent
/// issuances for the same application both write equivalent data.
#[async_trait]
pub trait CardLocationStore {
    async fn persist_card_location(
        &self,
        application_id: Uuid,
        url: &str,
        card_id: &str,
    ) -> Result<(), String>;
}

/// Orchestrates the issuance pipeline against injected storage.
pub struct CardIssuer {
    storage: Arc<dyn ObjectStorage + Send + Sync>,
    http_client: reqwest::Client,
    config: IssuerConfig,
}

impl CardIssuer {
    pub fn new(
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        http_client: reqwest::Client,
        config: IssuerConfig,
    ) -> Self {
        Self {
            storage,
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Run one full issuance for `application_id`.
    ///
    /// On success the location store has been updated and the public URL is
    /// returned. On failure the store is untouched: the upload is the last
    /// fallible step before the single persistence write.
    pub async fn issue_card(
        &self,
        application_id: Uuid,
        request: &VoterCardRequest,
        store: &dyn CardLocationStore,
    ) -> Result<IssuedCard, CardError> {
        let result = self.run_pipeline(application_id, request, store).await;
        match &result {
            Ok(card) => {
                CARDS_ISSUED.inc();
                info!(
                    "issued card {} for application {}",
                    card.card_id, application_id
                );
            }
            Err(e) => {
                CARD_ISSUE_FAILURES.inc();
                warn!("issuance failed for application {}: {}", application_id, e);
            }
        }
        result
    }

    async fn run_pipeline(
        &self,
        application_id: Uuid,
        request: &VoterCardRequest,
        store: &dyn CardLocationStore,
    ) -> Result<IssuedCard, CardError> {
        request.validate().map_err(CardError::InvalidInput)?;

        let url = verification_url(&self.config.public_origin, &request.vin)?;
        let qr = encode_verification_qr(&url)?;
        let photo = self.fetch_photo(request.passport_photo_url.as_deref()).await;
        let pdf = render_card(request, &qr, photo.as_deref())?;

        // Fresh path per attempt so storage stays append-only and concurrent
        // issuances never collide.
        let path = format!(
            "voter-cards/{}-{}-{}.pdf",
            application_id,
            Utc::now().timestamp_millis(),
            Uuid::new_v4()
        );
        let stored_url = self
            .storage
            .upload(&path, &pdf, "application/pdf")
            .await
            .map_err(CardError::StorageUnavailable)?;

        let card_id = format!("VC-{}", request.application_ref);
        store
            .persist_card_location(application_id, &stored_url, &card_id)
            .await
            .map_err(CardError::PersistFailed)?;

        Ok(IssuedCard {
            url: stored_url,
            card_id,
        })
    }

    /// Best-effort fetch of the passport photo. Any failure degrades to the
    /// rendered placeholder; a card without a photo is still a valid card.
    async fn fetch_photo(&self, photo_url: Option<&str>) -> Option<Vec<u8>> {
        let url = photo_url?;
        debug!("fetching passport photo from {}", url);
        match self.http_client.get(url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => Some(bytes.to_vec()),
                Err(e) => {
                    warn!("failed to read passport photo body, using placeholder: {e}");
                    None
                }
            },
            Ok(response) => {
                warn!(
                    "passport photo fetch returned status {}, using placeholder",
                    response.status()
                );
                None
            }
            Err(e) => {
                warn!("passport photo fetch failed, using placeholder: {e}");
                None
            }
        }
    }
}
