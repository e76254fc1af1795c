use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::models::ApplicationRecord;

/// Read-only view returned to the public verifier. Derived on demand from
/// the application record; no verification history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationRecord {
    #[schema(example = "Adaeze Ngozi Okafor")]
    pub name: String,
    #[schema(example = "90F5B1E64D21A73ONQ4")]
    pub vin: String,
    #[schema(example = "VC-EV-2026-000123")]
    pub card_id: String,
    #[schema(example = "Anambra")]
    pub state: String,
    #[schema(example = "Awka North")]
    pub lga: String,
    /// Always `"ACTIVE"` in the view, whatever the stored status text is.
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub verified_at: DateTime<Utc>,
}

/// Body of `GET /verify/{vin}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter: Option<VerificationRecord>,
}

/// Derive the public verification view for a record.
///
/// Returns `None` unless the record's status is exactly the approved state;
/// an approved record is always presented as `ACTIVE`. `verified_at` is
/// injected so the derivation stays a pure function.
pub fn build_verification_view(
    record: &ApplicationRecord,
    verified_at: DateTime<Utc>,
) -> Option<VerificationRecord> {
    if !record.is_approved() {
        return None;
    }

    Some(VerificationRecord {
        name: record.card_request().full_name(),
        vin: record.vin.clone(),
        card_id: record
            .voter_card_id
            .clone()
            .unwrap_or_else(|| format!("VC-{}", record.application_ref)),
        state: record.state.clone(),
        lga: record.lga.clone(),
        status: "ACTIVE".to_string(),
        verified_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::models::APPROVED_STATUS;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn record(status: &str) -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
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
            status: status.to_string(),
            voter_card_pdf_url: None,
            voter_card_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_view_is_none_unless_approved() {
        let now = Utc::now();
        assert!(build_verification_view(&record("pending"), now).is_none());
        assert!(build_verification_view(&record("rejected"), now).is_none());
        assert!(build_verification_view(&record("APPROVED"), now).is_none());
        assert!(build_verification_view(&record(APPROVED_STATUS), now).is_some());
    }

    #[test]
    fn test_view_normalizes_status_to_active() {
        let view = build_verification_view(&record(APPROVED_STATUS), Utc::now()).unwrap();
        assert_eq!(view.status, "ACTIVE");
        assert_eq!(view.name, "Adaeze Ngozi Okafor");
        assert_eq!(view.card_id, "VC-EV-2026-000123");
    }

    #[test]
    fn test_view_prefers_stored_card_id() {
        let mut rec = record(APPROVED_STATUS);
        rec.voter_card_id = Some("VC-EV-2026-000123".to_string());
        let view = build_verification_view(&rec, Utc::now()).unwrap();
        assert_eq!(view.card_id, "VC-EV-2026-000123");
    }

    #[test]
    fn test_invalid_response_omits_voter() {
        let response = VerificationResponse {
            valid: false,
            voter: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"valid":false}"#);
    }
}
