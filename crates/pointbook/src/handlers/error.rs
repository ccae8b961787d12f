use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use pointbook_core::point::{PointError, ENTITY_NAME};
use pointbook_core::storage::{repository_error_to_status_code, RepositoryError};

use super::alerts::failure_alert;

const PROBLEM_WITH_MESSAGE: &str = "https://www.jhipster.tech/problem/problem-with-message";
const CONSTRAINT_VIOLATION: &str = "https://www.jhipster.tech/problem/constraint-violation";
const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub object_name: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

/// Problem payload returned with every 400 alert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: String,
    pub status: u16,
    pub message: String,
    pub entity_name: &'static str,
    pub error_key: &'static str,
    pub params: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// A 400 response carrying a problem body and `X-<app>-error` headers.
#[derive(Debug)]
pub struct BadRequestAlert {
    app_name: Arc<str>,
    problem: Problem,
}

impl BadRequestAlert {
    pub fn new(app_name: Arc<str>, error: &PointError) -> Self {
        let (problem_type, title, field_errors) = match error.field() {
            Some(field) => (
                CONSTRAINT_VIOLATION,
                "Method argument not valid".to_string(),
                vec![FieldError {
                    object_name: ENTITY_NAME,
                    field,
                    message: "NotNull",
                }],
            ),
            None => (PROBLEM_WITH_MESSAGE, error.to_string(), Vec::new()),
        };

        Self::with_problem(app_name, problem_type, title, error.error_key(), field_errors)
    }

    /// A body that could not be read as a point.
    pub fn malformed_body(app_name: Arc<str>, rejection: &JsonRejection) -> Self {
        Self::with_problem(
            app_name,
            PROBLEM_WITH_MESSAGE,
            rejection.body_text(),
            "validation",
            Vec::new(),
        )
    }

    fn with_problem(
        app_name: Arc<str>,
        problem_type: &'static str,
        title: String,
        error_key: &'static str,
        field_errors: Vec<FieldError>,
    ) -> Self {
        Self {
            app_name,
            problem: Problem {
                problem_type,
                title,
                status: StatusCode::BAD_REQUEST.as_u16(),
                message: format!("error.{error_key}"),
                entity_name: ENTITY_NAME,
                error_key,
                params: ENTITY_NAME,
                field_errors,
            },
        }
    }
}

impl IntoResponse for BadRequestAlert {
    fn into_response(self) -> Response {
        tracing::warn!(
            error_key = self.problem.error_key,
            title = %self.problem.title,
            "Bad request"
        );

        (
            StatusCode::BAD_REQUEST,
            failure_alert(&self.app_name, self.problem.error_key),
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self.problem),
        )
            .into_response()
    }
}

/// Errors returned by the point handlers.
pub enum ApiError {
    /// Client error with a problem body.
    Alert(BadRequestAlert),
    /// Bare status without a body.
    Status(StatusCode),
    /// Store or internal failure.
    App(AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Alert(alert) => alert.into_response(),
            ApiError::Status(status) => {
                tracing::warn!(status = %status, "Request rejected");
                status.into_response()
            }
            ApiError::App(err) => err.into_response(),
        }
    }
}

impl From<BadRequestAlert> for ApiError {
    fn from(alert: BadRequestAlert) -> Self {
        ApiError::Alert(alert)
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        ApiError::Status(status)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::App(AppError::from(err))
    }
}
