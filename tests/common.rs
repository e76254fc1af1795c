//! Shared test doubles for the issuance pipeline.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use uuid::Uuid;

use evoter_server::card::{CardLocationStore, VoterCardRequest};
use evoter_server::storage::{ObjectStorage, StorageError};

/// Append-only in-memory object store.
#[derive(Default)]
pub struct InMemoryStorage {
    pub uploads: Mutex<Vec<(String, Vec<u8>, String)>>,
    fail: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every upload fails, simulating an outage.
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(
        &self,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("simulated outage".to_string()));
        }
        let mut uploads = self.uploads.lock().unwrap();
        assert!(
            uploads.iter().all(|(existing, _, _)| existing != path),
            "append-only storage must never see a duplicate path"
        );
        uploads.push((path.to_string(), data.to_vec(), content_type.to_string()));
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.test/{}", path)
    }
}

/// Records card-location writes instead of touching a database.
#[derive(Default)]
pub struct RecordingLocationStore {
    pub writes: Mutex<Vec<(Uuid, String, String)>>,
}

impl RecordingLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardLocationStore for RecordingLocationStore {
    async fn persist_card_location(
        &self,
        application_id: Uuid,
        url: &str,
        card_id: &str,
    ) -> Result<(), String> {
        self.writes
            .lock()
            .unwrap()
            .push((application_id, url.to_string(), card_id.to_string()));
        Ok(())
    }
}

pub fn sample_request() -> VoterCardRequest {
    VoterCardRequest {
        first_name: "Adaeze".to_string(),
        middle_name: Some("Ngozi".to_string()),
        surname: "Okafor".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 11, 23).unwrap(),
        gender: "Female".to_string(),
        state: "Anambra".to_string(),
        lga: "Awka North".to_string(),
        ward: "Achalla Ward".to_string(),
        vin: "90F5B1E64D21A73ONQ4".to_string(),
        application_ref: "EV-2026-000123".to_string(),
        passport_photo_url: None,
        issue_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    }
}
