//! Voter-card issuance core.
//!
//! This module turns an approved application snapshot into a printable,
//! verifiable voter card:
//! - `models` - the immutable `VoterCardRequest` snapshot and its validation
//! - `qr` - verification URL building and QR rasterization
//! - `layout` - the single table of card geometry and font constants
//! - `renderer` - pure (request, qr, photo) -> PDF bytes
//! - `issuer` - the end-to-end pipeline: render, upload, persist location

pub mod common;
pub mod issuer;
pub mod layout;
pub mod models;
pub mod qr;
pub mod renderer;

pub use issuer::{CardIssuer, CardLocationStore, IssuerConfig};
pub use models::VoterCardRequest;
pub use qr::{encode_verification_qr, verification_url, QrImage};
pub use renderer::render_card;

use thiserror::Error;

/// Errors that can occur during card issuance.
///
/// Every variant is terminal for a single attempt; nothing is retried
/// internally and nothing is persisted before the upload succeeds.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("card request is invalid: {0}")]
    InvalidInput(String),
    #[error("failed to encode verification QR: {0}")]
    QrEncodingFailed(String),
    #[error("failed to render card document: {0}")]
    RenderingFailed(String),
    #[error("artifact upload failed: {0}")]
    StorageUnavailable(#[source] crate::storage::StorageError),
    #[error("failed to persist card location: {0}")]
    PersistFailed(String),
}

/// Result of a successful issuance.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct IssuedCard {
    /// Public URL of the uploaded PDF artifact.
    #[schema(example = "https://xyz.supabase.co/storage/v1/object/public/voter-cards/1b2.pdf")]
    pub url: String,
    /// Display identifier printed on the card, `VC-` + application reference.
    #[schema(example = "VC-EV-2026-000123")]
    pub card_id: String,
}
