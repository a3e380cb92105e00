//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested record was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the record has been created.
    #[error("the requested record could not be found")]
    NotFound,

    /// The record API could not be reached, or it answered with something
    /// that is not a valid response envelope.
    ///
    /// The string holds the underlying transport or decode error and should
    /// only be logged on the server.
    #[error("could not complete the record API request: {0}")]
    RecordApiUnavailable(String),

    /// The record API answered with `success: false`.
    #[error("the record API reported a failure: {0}")]
    RecordApiFailure(String),

    /// One or more records in a create, update or delete request were
    /// rejected by the record API.
    ///
    /// Each string is either a field error formatted as
    /// `"{field label}: {message}"` or the message of the failed result.
    #[error("the record API rejected the change: {}", .0.join("; "))]
    RecordsRejected(Vec<String>),

    /// A mutation succeeded but the record API did not return the stored record.
    #[error("the record API did not return the stored record")]
    MissingMutationResult,

    /// A record returned by the record API is missing a field the app relies on.
    #[error("record is missing the field \"{0}\"")]
    MalformedRecord(String),

    /// A budget already exists for the category and month.
    #[error("a budget for category {category_id} and month {month} already exists")]
    DuplicateBudget {
        /// The category of the existing budget.
        category_id: i64,
        /// The month of the existing budget, formatted as `YYYY-MM`.
        month: String,
    },

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            return Error::NotFound;
        }

        Error::RecordApiUnavailable(error.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Record not found".to_owned(),
                    details: "The record could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::RecordsRejected(messages) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "The change was rejected".to_owned(),
                    details: messages.join("; "),
                },
            ),
            Error::RecordApiFailure(message) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The record store reported an error".to_owned(),
                    details: message,
                },
            ),
            Error::RecordApiUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the record store".to_owned(),
                    details: "Check your connection and try again.".to_owned(),
                },
            ),
            Error::DuplicateBudget { month, .. } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "A budget for this category and month already exists".to_owned(),
                    details: format!(
                        "Edit the existing budget for {month} instead of creating a new one."
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
