//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::correlate::CorrelateError;
use crate::domain::{RequestId, StopCode};
use crate::registry::RegistryError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/requests", post(new_request))
        .route("/api/requests/:id", get(request_status))
        .route("/api/mail/inbound", post(inbound_mail))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create a new arrival lookup; returns the handle to poll with.
async fn new_request(
    State(state): State<AppState>,
    Json(body): Json<NewRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let stop_code =
        StopCode::parse(body.stop_code.trim()).map_err(|e| AppError::BadRequest {
            message: format!("invalid stop code {:?}: {e}", body.stop_code),
        })?;

    let request_id = state.registry.create_request(stop_code);

    Ok((
        StatusCode::ACCEPTED,
        Json(NewRequestResponse {
            request_id: request_id.to_string(),
        }),
    ))
}

/// Poll the status of a lookup.
async fn request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RequestStatusResponse>, AppError> {
    // A handle we never issued is indistinguishable from an expired
    // one, so unparseable ids report not-found rather than bad-request.
    let request_id = RequestId::parse(&id).map_err(|_| AppError::NotFound {
        message: format!("no such request: {id}"),
    })?;

    let request = state.registry.get_request(&request_id)?;

    Ok(Json(RequestStatusResponse::from_request(&request)))
}

/// Inbound provider mail webhook.
///
/// Extraction and parse failures return 4xx: they are permanent for a
/// given message, and the delivery mechanism must not redeliver on
/// client errors.
async fn inbound_mail(
    State(state): State<AppState>,
    Json(mail): Json<InboundMailBody>,
) -> Result<Json<CorrelationResponse>, AppError> {
    let report = state.correlator.correlate(&mail.subject, &mail.body)?;

    Ok(Json(CorrelationResponse::from_report(&report)))
}

/// Application error type.
///
/// Every failure here is a client- or provider-side condition; there
/// is no internal failure path, so no 5xx variant exists.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            RegistryError::InvalidState(_) => AppError::Conflict {
                message: e.to_string(),
            },
        }
    }
}

impl From<CorrelateError> for AppError {
    fn from(e: CorrelateError) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        // Log errors to stderr for debugging
        eprintln!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_status_codes() {
        let cases = [
            (
                AppError::BadRequest {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound {
                    message: "missing".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Conflict {
                    message: "raced".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::Unprocessable {
                    message: "dropped".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn registry_errors_map_onto_client_statuses() {
        let id = RequestId::generate();

        assert!(matches!(
            AppError::from(RegistryError::NotFound(id)),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            AppError::from(RegistryError::InvalidState(id)),
            AppError::Conflict { .. }
        ));
    }
}
