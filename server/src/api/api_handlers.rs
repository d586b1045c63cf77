//! HTTP request handlers for the phonebook API
//!
//! Each handler parses its inputs, calls the person service and turns the
//! outcome into a response. Failures go through [`ApiError`].

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    Json as JsonExtractor,
};
use serde::Serialize;
use std::sync::Arc;

use phonebook_core::{
    core::AppState, log_debug, log_info, log_warn, storage::StorageImpl, types::PersonPayload,
    Person, PhonebookError,
};

use super::api_error::{ApiError, ApiResult, ErrorResponse};

/// System health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current system status
    pub status: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Service version
    pub version: String,
}

/// Custom JSON extractor that returns proper JSON error responses
pub struct JsonRequest<T>(pub T);

impl<T, S> FromRequest<S> for JsonRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match JsonExtractor::<T>::from_request(req, state).await {
            Ok(JsonExtractor(value)) => Ok(JsonRequest(value)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        log_debug!("Invalid JSON data: {}", err);
                        "Invalid JSON data".to_string()
                    }
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing or invalid Content-Type header. Expected 'application/json'"
                            .to_string()
                    }
                    JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
                    _ => "Invalid JSON request".to_string(),
                };

                log_warn!("JSON parsing error: {}", error_message);
                Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error_message))))
            }
        }
    }
}

/// List every person
pub async fn list_persons<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<Vec<Person>>> {
    let persons = app_state.persons.list()?;
    log_debug!("Listing {} persons", persons.len());
    Ok(Json(persons))
}

/// Get a person by ID
pub async fn get_person<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Person>> {
    Ok(Json(app_state.persons.get(&id)?))
}

/// Create a new person
pub async fn create_person<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    JsonRequest(payload): JsonRequest<PersonPayload>,
) -> ApiResult<Json<Person>> {
    log_debug!("Create request: {:?}", payload);
    let person = app_state.persons.create(payload)?;
    log_info!("Person created: {}", person.id);
    Ok(Json(person))
}

/// Replace name and number of a person
pub async fn update_person<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonRequest(payload): JsonRequest<PersonPayload>,
) -> ApiResult<Json<Person>> {
    log_debug!("Update request for {}: {:?}", id, payload);
    Ok(Json(app_state.persons.update(&id, payload)?))
}

/// Delete a person; deleting an absent person still answers 204
pub async fn delete_person<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    app_state.persons.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record count and server time as an HTML fragment
pub async fn info<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> ApiResult<Html<String>> {
    Ok(Html(app_state.persons.info()?.to_html()))
}

/// Health check endpoint
pub async fn health_check<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: app_state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for every route that matched nothing
pub async fn unknown_endpoint() -> Response {
    ApiError(PhonebookError::UnknownRoute).into_response()
}
