//! # Error Handling for list views
//!
//! Every failure a list request can hit maps onto one [`ApiError`] variant:
//! - `NotFound` (404) when a named entity in the route does not exist
//! - `BadRequest` (400) for malformed DataTables parameters
//! - `Database` (500) for storage failures, logged but never shown to the client
//! - `Internal` (500) for everything else, e.g. template rendering
//!
//! Malformed *search text* never reaches this module: the predicate builders
//! treat it as "no filter".
//!
//! ```rust,ignore
//! use bigg_tables::ApiError;
//!
//! async fn handler(db: &DatabaseConnection) -> Result<Json<TableResponse>, ApiError> {
//!     let model = model::Entity::find()
//!         .filter(model::Column::BiggId.eq(&bigg_id))
//!         .one(db)
//!         .await?
//!         .ok_or_else(|| ApiError::not_found("Model", Some(bigg_id)))?;
//!     // ...
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Message returned for every unparseable DataTables parameter.
pub const UNPARSEABLE_ARGUMENTS: &str = "could not parse arguments";

/// API error type with logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - named entity doesn't exist
    NotFound {
        /// Entity type (e.g., "Model", "Genome")
        resource: String,
        /// Identifier that wasn't found
        id: Option<String>,
    },

    /// 400 Bad Request - malformed request shape
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 500 Internal Server Error - storage failure (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },

    /// 500 Internal Server Error - anything else
    Internal {
        /// User-facing generic message
        message: String,
        /// Internal error details (logged, not sent to user)
        internal: Option<String>,
    },
}

impl ApiError {
    /// Create a 404 Not Found error
    ///
    /// ```rust,ignore
    /// return Err(ApiError::not_found("Model", Some("iJO1366".to_string())));
    /// ```
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// The 400 returned for any DataTables parameter that cannot be understood.
    #[must_use]
    pub fn unparseable_arguments() -> Self {
        Self::bad_request(UNPARSEABLE_ARGUMENTS)
    }

    /// Create a 500 error from a database error. The details are logged, not sent.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Create a 500 Internal Server Error with optional details
    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} {id} not found"),
                None => format!("{resource} not found"),
            },
            Self::BadRequest { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Error body sent to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// `DbErr::RecordNotFound` becomes a 404, every other storage error a 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::database(err),
        }
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(err: minijinja::Error) -> Self {
        Self::internal("Failed to render page", Some(err.to_string()))
    }
}
