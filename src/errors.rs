use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned to clients: a human-readable title, a detail message
/// and the numeric status code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error title (e.g., "Invalid sortBy value.")
    pub error: String,
    /// Human-readable error detail
    pub message: String,
    /// HTTP status code
    pub status: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("The requested product does not exist.")]
    NotFound,

    #[error("Allowed values: name, price, createdAt.")]
    InvalidSortField,

    #[error("Allowed values: asc, desc.")]
    InvalidSortDirection,

    #[error("minPrice cannot be greater than maxPrice.")]
    InvalidPriceRange,

    #[error("minPrice cannot be negative.")]
    InvalidMinPrice,

    #[error("maxPrice cannot be negative.")]
    InvalidMaxPrice,

    #[error("name cannot be longer than 200 characters.")]
    InvalidNameFilter,

    #[error("{0}")]
    InvalidName(String),

    #[error("Description cannot be longer than 1000 characters.")]
    InvalidDescription,

    #[error("Price must be greater than zero.")]
    InvalidPrice,
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidSortField
            | Self::InvalidSortDirection
            | Self::InvalidPriceRange
            | Self::InvalidMinPrice
            | Self::InvalidMaxPrice
            | Self::InvalidNameFilter
            | Self::InvalidName(_)
            | Self::InvalidDescription
            | Self::InvalidPrice => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the short error title shown alongside the detail message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "Internal server error.",
            Self::NotFound => "Product not found.",
            Self::InvalidSortField => "Invalid sortBy value.",
            Self::InvalidSortDirection => "Invalid sortDir value.",
            Self::InvalidPriceRange => "Invalid price range.",
            Self::InvalidMinPrice => "Invalid minPrice value.",
            Self::InvalidMaxPrice => "Invalid maxPrice value.",
            Self::InvalidNameFilter => "Invalid name filter.",
            Self::InvalidName(_) => "Invalid product name.",
            Self::InvalidDescription => "Invalid product description.",
            Self::InvalidPrice => "Invalid product price.",
        }
    }

    /// Returns the error detail suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "An unexpected error occurred.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.title().to_string(),
            message: self.response_message(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::InvalidSortField.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidSortDirection.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidPriceRange.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidName("Name is required.".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidPrice.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn titles_match_the_offending_parameter() {
        assert_eq!(
            ServiceError::InvalidSortField.title(),
            "Invalid sortBy value."
        );
        assert_eq!(
            ServiceError::InvalidSortDirection.title(),
            "Invalid sortDir value."
        );
        assert_eq!(ServiceError::InvalidMinPrice.title(), "Invalid minPrice value.");
        assert_eq!(ServiceError::InvalidMaxPrice.title(), "Invalid maxPrice value.");
        assert_eq!(ServiceError::InvalidNameFilter.title(), "Invalid name filter.");
        assert_eq!(ServiceError::NotFound.title(), "Product not found.");
    }

    #[test]
    fn response_message_hides_database_details() {
        let err = ServiceError::DatabaseError(DbErr::Custom("connection refused".into()));
        assert_eq!(err.response_message(), "An unexpected error occurred.");

        // User-facing errors keep the actual detail
        assert_eq!(
            ServiceError::InvalidPriceRange.response_message(),
            "minPrice cannot be greater than maxPrice."
        );
    }

    #[tokio::test]
    async fn error_body_carries_title_detail_and_status() {
        let response = ServiceError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Product not found.");
        assert_eq!(payload.message, "The requested product does not exist.");
        assert_eq!(payload.status, 404);
    }
}
