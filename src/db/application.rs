//! Application-record database operations

use async_trait::async_trait;
use uuid::Uuid;

use super::AppState;
use crate::application::models::ApplicationRecord;
use crate::card::CardLocationStore;

const RECORD_COLUMNS: &str = "id, first_name, middle_name, surname, date_of_birth, gender, \
     state, lga, ward, vin, application_ref, passport_photo_url, status, \
     voter_card_pdf_url, voter_card_id, created_at, updated_at";

impl AppState {
    pub async fn get_application_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ApplicationRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, ApplicationRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// VIN lookup for the public verification endpoint, cached briefly.
    pub async fn get_application_by_vin(
        &self,
        vin: &str,
    ) -> Result<Option<ApplicationRecord>, sqlx::Error> {
        if let Some(record) = self.verification_cache.get(vin).await {
            return Ok(Some(record));
        }

        let query = format!("SELECT {RECORD_COLUMNS} FROM applications WHERE vin = $1");
        let record = sqlx::query_as::<_, ApplicationRecord>(&query)
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(ref found) = record {
            self.verification_cache
                .insert(vin.to_string(), found.clone())
                .await;
        }

        Ok(record)
    }

    /// Last-writer-wins write of the artifact location. Concurrent issuances
    /// for the same application persist equivalent data, so no transactional
    /// merge is needed.
    pub async fn update_card_location(
        &self,
        id: &Uuid,
        url: &str,
        card_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE applications \
             SET voter_card_pdf_url = $2, voter_card_id = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(url)
        .bind(card_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CardLocationStore for AppState {
    async fn persist_card_location(
        &self,
        application_id: Uuid,
        url: &str,
        card_id: &str,
    ) -> Result<(), String> {
        self.update_card_location(&application_id, url, card_id)
            .await
            .map_err(|e| e.to_string())
    }
}
