use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

#[derive(Debug)]
pub enum RequestError {
    InvalidIdType(&'static str),
    MissingFields,
    InvalidSortColumn,
    InvalidOrder,
    InvalidVoteValue,
    InvalidUsernameFormat,
    RelatedResourceNotFound(&'static str),
    NotFound(&'static str),
    TopicNotFound,
    DatabaseError(sqlx::Error),
}

/// Coarse classification of raw store errors, so the status mapping below
/// never depends on backend-specific codes directly.
#[derive(Debug, PartialEq, Eq)]
pub enum BackendErrorKind {
    ForeignKeyViolation,
    UniqueViolation,
    Other,
}

pub fn classify_backend_error(error: &sqlx::Error) -> BackendErrorKind {
    if let sqlx::Error::Database(db_error) = error {
        let message = db_error.message();
        if message.contains("FOREIGN KEY constraint failed") {
            return BackendErrorKind::ForeignKeyViolation;
        }
        if message.contains("UNIQUE constraint failed") {
            return BackendErrorKind::UniqueViolation;
        }
    }
    BackendErrorKind::Other
}

#[derive(serde::Serialize)]
pub struct RequestErrorJson {
    msg: String,
}

impl RequestErrorJson {
    pub fn new(msg: &str) -> RequestErrorJson {
        RequestErrorJson {
            msg: msg.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    /// Re-raise an insert failure as "the referenced row is missing" when the
    /// backend reported a referential-integrity violation; anything else stays
    /// a plain backend error and renders as a 500.
    pub fn from_insert_error(error: sqlx::Error, missing: &'static str) -> Self {
        match classify_backend_error(&error) {
            BackendErrorKind::ForeignKeyViolation => RequestError::RelatedResourceNotFound(missing),
            _ => RequestError::DatabaseError(error),
        }
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        let (status_code, json) = match self {
            RequestError::InvalidIdType(message) => {
                (StatusCode::BAD_REQUEST, RequestErrorJson::new(message))
            }
            RequestError::MissingFields => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::new("Missing required fields"),
            ),
            RequestError::InvalidSortColumn => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::new("Invalid sort column"),
            ),
            RequestError::InvalidOrder => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::new("Invalid order query"),
            ),
            RequestError::InvalidVoteValue => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::new("Invalid vote value"),
            ),
            RequestError::InvalidUsernameFormat => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::new("Invalid username format"),
            ),
            RequestError::RelatedResourceNotFound(message) => {
                (StatusCode::NOT_FOUND, RequestErrorJson::new(message))
            }
            RequestError::NotFound(message) => {
                (StatusCode::NOT_FOUND, RequestErrorJson::new(message))
            }
            RequestError::TopicNotFound => {
                (StatusCode::NOT_FOUND, RequestErrorJson::new("Topic not found"))
            }
            RequestError::DatabaseError(e) => {
                eprintln!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJson::new("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
