//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
    transaction::ValidationError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a transaction were invalid.
    ///
    /// The inner error lists every violated field, not just the first.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A write was attempted before the transaction store was initialized.
    #[error("the transaction store has not been initialized")]
    StoreNotInitialized,

    /// The database was created by a newer version of the application, or by
    /// another program entirely.
    #[error("the database schema version {0} is not supported by this version of the application")]
    UnsupportedSchemaVersion(i64),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl Error {
    /// Whether the error came from the database rather than from the request.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Error::SqlError(_)
                | Error::DatabaseLockError
                | Error::StoreNotInitialized
                | Error::UnsupportedSchemaVersion(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::Validation(_) => self.into_alert_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::UnsupportedSchemaVersion(version) => InternalServerError {
                description: "Unsupported Database",
                fix: &format!(
                    "The database has schema version {version}, which this version of the app \
                    does not understand. Upgrade the app or use another database file."
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
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
            Error::Validation(error) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::ErrorList {
                    message: "Could not save transaction".to_owned(),
                    details: error
                        .errors()
                        .iter()
                        .map(|field_error| field_error.message.clone())
                        .collect(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not find transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if it has been deleted."
                        .to_owned(),
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
            error if error.is_storage_error() => {
                tracing::error!("A storage error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Could not access the database".to_owned(),
                        details: "Your transactions have not been changed. \
                        Try again later or check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
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

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::parse_html_fragment,
        transaction::{Field, ValidationError},
    };

    #[test]
    fn no_rows_is_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn storage_errors_are_grouped() {
        assert!(Error::DatabaseLockError.is_storage_error());
        assert!(Error::StoreNotInitialized.is_storage_error());
        assert!(Error::UnsupportedSchemaVersion(9).is_storage_error());
        assert!(Error::SqlError(rusqlite::Error::InvalidQuery).is_storage_error());
        assert!(!Error::NotFound.is_storage_error());
        assert!(!Error::from(ValidationError::new(Field::Amount, "bad")).is_storage_error());
    }

    #[tokio::test]
    async fn storage_errors_get_a_database_alert() {
        for error in [Error::DatabaseLockError, Error::StoreNotInitialized] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let text: String = parse_html_fragment(response)
                .await
                .root_element()
                .text()
                .collect();
            assert!(text.contains("Could not access the database"), "{text}");
            assert!(text.contains("have not been changed"), "{text}");
        }
    }

    #[tokio::test]
    async fn not_found_alert_is_not_a_storage_alert() {
        let response = Error::NotFound.into_alert_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let text: String = parse_html_fragment(response)
            .await
            .root_element()
            .text()
            .collect();
        assert!(!text.contains("Could not access the database"), "{text}");
    }

    #[test]
    fn status_codes() {
        let cases = [
            (Error::NotFound, StatusCode::NOT_FOUND),
            (
                Error::Validation(ValidationError::new(Field::Date, "bad")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::UnsupportedSchemaVersion(3),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(error.into_response().status(), want);
        }
    }
}
