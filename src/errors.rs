use crate::ledger::LedgerError;
use crate::reminder::ReminderError;
use crate::theme::ThemeError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AlreadyPresent(_) => Self::conflict(err.to_string()),
            LedgerError::OutOfRange(_) => Self::bad_request(err.to_string()),
            LedgerError::Malformed(_) => Self::internal(err),
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_map_to_client_statuses() {
        let out_of_range: AppError = LedgerError::OutOfRange(400.0).into();
        assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
        assert_eq!(out_of_range.message, "Enter a number between 1 and 365");

        let duplicate: AppError = LedgerError::AlreadyPresent(4).into();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(duplicate.message, "That day is already completed!");
    }
}
