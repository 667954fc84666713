use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use combined_events::CombinedEventError;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Domain(CombinedEventError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

fn domain_status(error: &CombinedEventError) -> StatusCode {
    match error {
        CombinedEventError::NotFound => StatusCode::NOT_FOUND,
        CombinedEventError::UnknownDiscipline { .. }
        | CombinedEventError::DisciplineNotInEvent { .. }
        | CombinedEventError::ImplausiblePerformance { .. }
        | CombinedEventError::PointsOutOfRange { .. }
        | CombinedEventError::TotalOutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
        CombinedEventError::TransactionAborted(_) | CombinedEventError::ConstraintViolation(_) => {
            StatusCode::CONFLICT
        }
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Domain(e) => domain_status(e),
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            Self::Domain(CombinedEventError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Domain(CombinedEventError::TransactionAborted(_)) => {
                json!({
                    "error": "The entry was modified concurrently, please retry"
                })
            }
            Self::Domain(e) if status_code == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Internal error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Domain(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<CombinedEventError> for WebError {
    fn from(error: CombinedEventError) -> Self {
        Self::Domain(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;
