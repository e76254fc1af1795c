use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::card::VoterCardRequest;

/// Status value an application must carry before a card can be issued.
/// The review workflow owns the transition into this state.
pub const APPROVED_STATUS: &str = "approved";

/// A voter-registration application row, as owned by the review workflow.
///
/// This server only reads approved rows and writes the two card-location
/// fields back after a successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ApplicationRecord {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "Adaeze")]
    pub first_name: String,
    #[schema(example = "Ngozi")]
    pub middle_name: Option<String>,
    #[schema(example = "Okafor")]
    pub surname: String,
    pub date_of_birth: NaiveDate,
    #[schema(example = "Female")]
    pub gender: String,
    #[schema(example = "Anambra")]
    pub state: String,
    #[schema(example = "Awka North")]
    pub lga: String,
    #[schema(example = "Achalla Ward")]
    pub ward: String,
    #[schema(example = "90F5B1E64D21A73ONQ4")]
    pub vin: String,
    #[schema(example = "EV-2026-000123")]
    pub application_ref: String,
    pub passport_photo_url: Option<String>,
    #[schema(example = "approved")]
    pub status: String,
    /// Public URL of the most recently issued card PDF, if any.
    pub voter_card_pdf_url: Option<String>,
    /// Card id of the most recent issuance, `VC-` + application reference.
    pub voter_card_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn is_approved(&self) -> bool {
        self.status == APPROVED_STATUS
    }

    /// Snapshot handed to the issuance pipeline. The issue date is the
    /// moment the snapshot is taken.
    pub fn card_request(&self) -> VoterCardRequest {
        VoterCardRequest {
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            surname: self.surname.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.clone(),
            state: self.state.clone(),
            lga: self.lga.clone(),
            ward: self.ward.clone(),
            vin: self.vin.clone(),
            application_ref: self.application_ref.clone(),
            passport_photo_url: self.passport_photo_url.clone(),
            issue_date: Utc::now().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
            first_name: "Adaeze".to_string(),
            middle_name: None,
            surname: "Okafor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 11, 23).unwrap(),
            gender: "Female".to_string(),
            state: "Anambra".to_string(),
            lga: "Awka North".to_string(),
            ward: "Achalla Ward".to_string(),
            vin: "90F5B1E64D21A73ONQ4".to_string(),
            application_ref: "EV-2026-000123".to_string(),
            passport_photo_url: None,
            status: APPROVED_STATUS.to_string(),
            voter_card_pdf_url: None,
            voter_card_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_approved_matches_exact_status() {
        let mut rec = record();
        assert!(rec.is_approved());
        rec.status = "pending".to_string();
        assert!(!rec.is_approved());
        rec.status = "Approved".to_string();
        assert!(!rec.is_approved());
    }

    #[test]
    fn test_card_request_copies_identity_fields() {
        let rec = record();
        let request = rec.card_request();
        assert_eq!(request.vin, rec.vin);
        assert_eq!(request.application_ref, rec.application_ref);
        assert_eq!(request.issue_date, Utc::now().date_naive());
    }
}
