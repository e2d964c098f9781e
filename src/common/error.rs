// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::views;

// ---
// Errors of the backend/auth HTTP wrappers
// ---

/// Outcome of a failed call to the backend or the auth service.
///
/// Every service method returns `ServiceResult<T>`; nothing past the wrapper
/// ever panics on a bad response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to {action}: network error")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {action}: {status}")]
    Status {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to {action}: unexpected response")]
    Decode {
        action: &'static str,
        detail: String,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Text shown to the user in notices and error states. A `message` the
    /// backend put in its error body is appended.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Status { body, .. } => match backend_message(body) {
                Some(detail) => format!("{self} ({detail})"),
                None => self.to_string(),
            },
            _ => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// ---
// Page-level errors
// ---

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Page not found")]
    NotFound,

    #[error("Login required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::Forbidden => return Redirect::to("/unauthorized").into_response(),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, validation_messages(&errors).join(" "))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "The page you requested does not exist.".to_string()),
            AppError::Service(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, err.message())
            }
            AppError::Service(err) => {
                tracing::warn!("Backend call failed: {}", err);
                (StatusCode::BAD_GATEWAY, err.message())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong. Please try again.".to_string())
            }
        };

        (status, views::error_page(status, &message)).into_response()
    }
}

/// Flattens validator output into the field messages declared on the payloads.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}.", field))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
        name: String,
    }

    #[test]
    fn status_errors_expose_code_and_auth_state() {
        let err = ServiceError::Status {
            action: "create order",
            status: 401,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Failed to create order: 401");

        let missing = ServiceError::Status {
            action: "delete meal",
            status: 404,
            body: "not found".into(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_unauthorized());
        assert_eq!(missing.message(), "Failed to delete meal: 404");
    }

    #[test]
    fn backend_message_is_shown() {
        let err = ServiceError::Status {
            action: "create order",
            status: 400,
            body: r#"{"success":false,"message":"Meal is out of stock"}"#.into(),
        };
        assert_eq!(err.message(), "Failed to create order: 400 (Meal is out of stock)");
    }

    #[test]
    fn validation_messages_use_declared_text() {
        let errors = Named { name: "a".into() }.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["Name must be at least 2 characters.".to_string()]
        );
    }

    #[test]
    fn auth_errors_redirect() {
        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");

        let response = AppError::Forbidden.into_response();
        assert_eq!(response.headers()["location"], "/unauthorized");
    }
}
