use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_forms_contracts::{FormFeatureService, FormSubmitError};
use folio_models::form::{FormSubmission, FormValidationError};
use tracing::warn;

use super::{error, internal_server_error};
use crate::models::forms::{ApiContactForm, ApiFormSubmitted, ApiQuoteForm};

pub fn router(service: Arc<impl FormFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(contact))
        .route("/api/quote", routing::post(quote))
        .with_state(service)
}

async fn contact(
    service: State<Arc<impl FormFeatureService>>,
    body: Result<Json<ApiContactForm>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(form)) => submit(&**service, FormSubmission::contact(form.into())).await,
        Err(rejection) => invalid_body(rejection),
    }
}

async fn quote(
    service: State<Arc<impl FormFeatureService>>,
    body: Result<Json<ApiQuoteForm>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(form)) => submit(&**service, FormSubmission::quote(form.into())).await,
        Err(rejection) => invalid_body(rejection),
    }
}

async fn submit(service: &impl FormFeatureService, submission: FormSubmission) -> Response {
    match service.submit(submission).await {
        Ok(id) => Json(ApiFormSubmitted {
            success: true,
            message_id: id.to_string(),
        })
        .into_response(),
        Err(FormSubmitError::Validation(err)) => error(
            StatusCode::BAD_REQUEST,
            match err {
                FormValidationError::MissingFields => "Missing required fields",
                FormValidationError::InvalidEmail => "Invalid email format",
                FormValidationError::FieldTooLong => "Field length exceeds maximum",
            },
        ),
        Err(FormSubmitError::Configuration) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
        }
        Err(FormSubmitError::NotificationFailed) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
        }
        Err(FormSubmitError::Other(err)) => internal_server_error(err),
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    warn!(status = %rejection.status(), "rejected request body: {}", rejection.body_text());
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
