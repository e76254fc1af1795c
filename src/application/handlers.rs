use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use log::{debug, error, info};
use uuid::Uuid;

use crate::application::models::ApplicationRecord;
use crate::card::{CardError, IssuedCard};
use crate::db::AppState;
use crate::ErrorResponse;

fn card_error_response(e: &CardError) -> HttpResponse {
    match e {
        CardError::InvalidInput(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(message))
        }
        CardError::StorageUnavailable(_) | CardError::PersistFailed(_) => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::service_unavailable(
                "Card storage is temporarily unavailable",
            ))
        }
        CardError::QrEncodingFailed(_) | CardError::RenderingFailed(_) => {
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate voter card"))
        }
    }
}

async fn load_approved_application(
    data: &web::Data<AppState>,
    id: &Uuid,
) -> Result<ApplicationRecord, HttpResponse> {
    match data.get_application_by_id(id).await {
        Ok(Some(record)) if record.is_approved() => Ok(record),
        Ok(Some(record)) => {
            error!(
                "card requested for application {} with status '{}'",
                id, record.status
            );
            Err(HttpResponse::Conflict().json(ErrorResponse::new(
                "Conflict",
                "Application is not approved; no card can be issued",
            )))
        }
        Ok(None) => {
            error!("application not found for card request: {}", id);
            Err(HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
                "Application with ID {} not found",
                id
            ))))
        }
        Err(e) => {
            error!("failed to load application {}: {}", id, e);
            Err(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to retrieve application")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Voter Card Service",
    post,
    path = "/applications/{id}/card",
    responses(
        (status = 201, description = "Card issued and location persisted", body = IssuedCard),
        (status = 400, description = "Invalid application snapshot", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Application is not approved", body = ErrorResponse),
        (status = 500, description = "Card generation failed", body = ErrorResponse),
        (status = 503, description = "Artifact storage unavailable", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the approved application")
    )
)]
pub async fn issue_card(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let application_id = id.into_inner();
    info!("Executing issue_card handler for application {}", application_id);

    let record = match load_approved_application(&data, &application_id).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    // An issuance failure here never rolls back the approval: approval is a
    // separate, already committed transition, and the card can still be
    // generated on first download.
    let request = record.card_request();
    match data
        .issuer
        .issue_card(application_id, &request, data.get_ref())
        .await
    {
        Ok(card) => HttpResponse::Created().json(card),
        Err(e) => {
            error!(
                "card issuance failed for application {}: {}",
                application_id, e
            );
            card_error_response(&e)
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Voter Card Service",
    get,
    path = "/applications/{id}/card",
    responses(
        (status = 307, description = "Redirect to the freshly generated card PDF"),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Application is not approved", body = ErrorResponse),
        (status = 500, description = "Card generation failed", body = ErrorResponse),
        (status = 503, description = "Artifact storage unavailable", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the approved application")
    )
)]
pub async fn download_card(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let application_id = id.into_inner();
    info!(
        "Executing download_card handler for application {}",
        application_id
    );

    let record = match load_approved_application(&data, &application_id).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    if !data.issuer.config().always_regenerate {
        if let Some(url) = &record.voter_card_pdf_url {
            debug!(
                "regeneration disabled, redirecting application {} to stored card",
                application_id
            );
            return HttpResponse::TemporaryRedirect()
                .append_header(("Location", url.as_str()))
                .finish();
        }
    }

    debug!("running fresh issuance for download of {}", application_id);
    let request = record.card_request();
    match data
        .issuer
        .issue_card(application_id, &request, data.get_ref())
        .await
    {
        Ok(card) => HttpResponse::TemporaryRedirect()
            .append_header(("Location", card.url))
            .finish(),
        Err(e) => {
            error!(
                "card download failed for application {}: {}",
                application_id, e
            );
            card_error_response(&e)
        }
    }
}
