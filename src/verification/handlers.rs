use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use chrono::Utc;
use log::{error, info};

use crate::db::AppState;
use crate::verification::model::{build_verification_view, VerificationResponse};
use crate::ErrorResponse;

#[utoipa::path(
    tag = "Verification",
    get,
    path = "/verify/{vin}",
    responses(
        (status = 200, description = "Verification result for the VIN", body = VerificationResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    params(
        ("vin" = String, Path, description = "Voter identification number printed on the card")
    )
)]
pub async fn verify_card(vin: Path<String>, data: web::Data<AppState>) -> impl Responder {
    let vin = vin.into_inner();
    info!("Executing verify_card handler for VIN {}", vin);

    match data.get_application_by_vin(&vin).await {
        Ok(Some(record)) => {
            let voter = build_verification_view(&record, Utc::now());
            HttpResponse::Ok().json(VerificationResponse {
                valid: voter.is_some(),
                voter,
            })
        }
        Ok(None) => HttpResponse::Ok().json(VerificationResponse {
            valid: false,
            voter: None,
        }),
        Err(e) => {
            error!("verification lookup failed for VIN {}: {}", vin, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to verify voter card"))
        }
    }
}
