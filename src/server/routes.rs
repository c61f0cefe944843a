//! Route handlers

use crate::anonymization::{AnonymizeRequest, EntityType, SubstitutionMethod};
use crate::core::mappings::MappingStore;
use crate::domain::MaskError;
use crate::server::app::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error body returned by every route
#[derive(Debug)]
pub struct ApiError(MaskError);

impl ApiError {
    fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<MaskError> for ApiError {
    fn from(err: MaskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            crate::log_error_with_context!(self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Parse a JSON body, reporting malformed input as a client error
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| MaskError::InvalidInput(format!("Invalid JSON body: {e}")).into())
}

fn require_text(text: Option<String>) -> ApiResult<String> {
    match text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(MaskError::InvalidInput("No text provided".to_string()).into()),
    }
}

#[derive(Debug, Deserialize)]
struct AnonymizeBody {
    text: Option<String>,
    url: Option<String>,
    anonymization_method: Option<String>,
    entities: Option<Vec<EntityType>>,
    config: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DeanonymizeBody {
    text: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness probe
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Full mapping store, keyed by context
pub async fn get_mappings_handler(State(state): State<AppState>) -> Json<MappingStore> {
    Json(state.engine.list_mappings().await)
}

/// Validate a client configuration and echo its resolved form
///
/// Nothing is stored; clients send their configuration with each
/// anonymize call.
pub async fn config_handler(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let raw: Value = if body.is_empty() {
        Value::Null
    } else {
        parse_body(&body)?
    };
    if raw.is_null() {
        return Err(MaskError::InvalidInput("No configuration provided".to_string()).into());
    }
    let (client, resolved) = state.engine.resolve_client_config(&raw)?;

    tracing::info!(
        sites = client.sites.len(),
        piis = client.piis.len(),
        method = %resolved.method,
        "Client configuration validated"
    );

    Ok(Json(json!({
        "status": "Configuration validated",
        "config": client,
        "resolved": resolved,
    })))
}

/// Anonymize the posted text under the posted URL
pub async fn anonymize_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let body: AnonymizeBody = parse_body(&body)?;
    let text = require_text(body.text)?;

    let mut request = AnonymizeRequest::new(text);
    request.context = body.url;
    request.entities = body.entities;
    request.config = body.config;
    if let Some(method) = body.anonymization_method {
        request.method = Some(method.parse::<SubstitutionMethod>()?);
    }

    let response = state.engine.anonymize(request).await?;
    Ok(Json(serde_json::to_value(response).map_err(MaskError::from)?))
}

/// Restore original values in the posted text
pub async fn deanonymize_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let body: DeanonymizeBody = parse_body(&body)?;
    let text = require_text(body.text)?;

    let response = state.engine.deanonymize(&text, body.url.as_deref()).await?;
    Ok(Json(serde_json::to_value(response).map_err(MaskError::from)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let bad = ApiError::from(MaskError::InvalidInput("No text provided".into()));
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(MaskError::NotFound("No mappings found".into()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let broken = ApiError::from(MaskError::InvariantViolation("overlap".into()));
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("hi".into())).unwrap(), "hi");
        assert!(require_text(Some(String::new())).is_err());
        assert!(require_text(None).is_err());
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        let err = parse_body::<Value>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
