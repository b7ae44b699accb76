//! Application error type shared by every DriveDesk service.
//!
//! [`AppError`] pairs an HTTP status with an [`anyhow::Error`] so services can
//! use `?` freely and still hand callers a meaningful status. Known domain
//! errors are classified on conversion: a [`PaginationError`] becomes
//! `400 Bad Request`, everything else defaults to `500 Internal Server Error`.
//!
//! An unsatisfied licence requirement is not an error at this level; callers
//! decide when to turn it into [`AppError::conflict`].

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::pagination::PaginationError;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// The request is well-formed but clashes with current state, e.g. a
    /// customer who does not meet the prerequisites of a licence category.
    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = if error.downcast_ref::<PaginationError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageParameter;

    #[test]
    fn test_conflict_status() {
        let err = AppError::conflict(anyhow::anyhow!("prerequisites not met"));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message(), "prerequisites not met");
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::not_found(anyhow::anyhow!("Licence category not found"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_pagination_error_maps_to_bad_request() {
        let err: AppError = PaginationError::ValueMustBeGreaterThanZero {
            parameter: PageParameter::PageSize,
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message().contains("pageSize"));
    }

    #[test]
    fn test_unknown_error_maps_to_internal() {
        let err: AppError = std::io::Error::other("disk gone").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::conflict(anyhow::anyhow!("nope")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
