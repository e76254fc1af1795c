//! Card request snapshot and its structural validation.

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

lazy_static! {
    static ref APPLICATION_REF_RE: Regex =
        Regex::new(r"^EV-\d{4}-\d{6}$").expect("application ref pattern is valid");
}

/// Immutable snapshot of an approved application, as handed over by the
/// review workflow. The issuance pipeline never reads the application record
/// again after this is built.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterCardRequest {
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
    /// Durable voter identification number, embedded in the verification URL.
    #[schema(example = "90F5B1E64D21A73ONQ4")]
    pub vin: String,
    /// Human-facing submission reference, `EV-<year>-<6 digits>`.
    #[schema(example = "EV-2026-000123")]
    pub application_ref: String,
    /// Previously uploaded passport photo, if any.
    pub passport_photo_url: Option<String>,
    pub issue_date: NaiveDate,
}

impl VoterCardRequest {
    /// Structural validation of the snapshot.
    ///
    /// The review workflow validates business rules before approval; this is
    /// the defensive check that the fields the card depends on are present
    /// and well-formed. Returns all problems at once.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors: Vec<String> = Vec::new();

        if self.vin.trim().is_empty() {
            errors.push("vin must not be empty".to_string());
        }
        if self.application_ref.trim().is_empty() {
            errors.push("application_ref must not be empty".to_string());
        } else if !APPLICATION_REF_RE.is_match(self.application_ref.trim()) {
            errors.push(format!(
                "application_ref '{}' does not match EV-<year>-<6 digits>",
                self.application_ref
            ));
        }
        if self.surname.trim().is_empty() {
            errors.push("surname must not be empty".to_string());
        }
        if self.first_name.trim().is_empty() {
            errors.push("first_name must not be empty".to_string());
        }
        if self.issue_date > Utc::now().date_naive() {
            errors.push(format!("issue_date {} is in the future", self.issue_date));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    /// Full name as printed on the verification view.
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) if !middle.trim().is_empty() => {
                format!("{} {} {}", self.first_name, middle.trim(), self.surname)
            }
            _ => format!("{} {}", self.first_name, self.surname),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> VoterCardRequest {
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

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_vin_rejected() {
        let mut request = valid_request();
        request.vin = "  ".to_string();
        let err = request.validate().unwrap_err();
        assert!(err.contains("vin"));
    }

    #[test]
    fn test_malformed_application_ref_rejected() {
        let mut request = valid_request();
        request.application_ref = "EV-26-12".to_string();
        let err = request.validate().unwrap_err();
        assert!(err.contains("application_ref"));
    }

    #[test]
    fn test_future_issue_date_rejected() {
        let mut request = valid_request();
        request.issue_date = Utc::now().date_naive() + chrono::Duration::days(2);
        let err = request.validate().unwrap_err();
        assert!(err.contains("issue_date"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut request = valid_request();
        request.vin = String::new();
        request.surname = String::new();
        let err = request.validate().unwrap_err();
        assert!(err.contains("vin"));
        assert!(err.contains("surname"));
    }

    #[test]
    fn test_full_name_skips_blank_middle_name() {
        let mut request = valid_request();
        assert_eq!(request.full_name(), "Adaeze Ngozi Okafor");
        request.middle_name = Some("  ".to_string());
        assert_eq!(request.full_name(), "Adaeze Okafor");
        request.middle_name = None;
        assert_eq!(request.full_name(), "Adaeze Okafor");
    }
}
