use aero_core::{CoreError, ValidationErrors};
use std::io::Write;
use std::process::ExitCode;

use crate::notice::Notice;

/// How a failed command is reported to the user
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Validation(ValidationErrors),
    InvalidState(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::NotFound => ExitCode::from(3),
            AppError::Validation(_) => ExitCode::from(2),
            AppError::InvalidState(_) => ExitCode::from(2),
            AppError::Internal(_) => ExitCode::FAILURE,
        }
    }

    /// Write the user-facing message; internal failures are also logged.
    pub fn report(&self, out: &mut dyn Write) -> std::io::Result<()> {
        match self {
            AppError::NotFound => writeln!(out, "{}", Notice::BookingNotFound),
            AppError::Validation(errors) => {
                writeln!(out, "Please fix the highlighted fields:")?;
                for err in errors.iter() {
                    writeln!(out, "  - {}: {}", err.field, err.message)?;
                }
                Ok(())
            }
            AppError::InvalidState(msg) => writeln!(out, "{}", msg),
            AppError::Internal(err) => {
                tracing::error!("Command failed: {:#}", err);
                writeln!(out, "Error: {:#}", err)
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();
        match err.downcast::<CoreError>() {
            Ok(CoreError::NotFound(_)) => AppError::NotFound,
            Ok(CoreError::ValidationFailed(errors)) => AppError::Validation(errors),
            Ok(err @ CoreError::InvalidTransition { .. }) => AppError::InvalidState(err.to_string()),
            Ok(err) => AppError::Internal(err.into()),
            Err(err) => AppError::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_shared::BookingId;

    fn render(err: &AppError) -> String {
        let mut out = Vec::new();
        err.report(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_core_errors_are_classified() {
        let err = AppError::from(anyhow::Error::new(CoreError::NotFound(BookingId(7))));
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(render(&err), "Booking not found\n");

        let mut errors = ValidationErrors::new();
        errors.push("email", "is required");
        let err = AppError::from(CoreError::ValidationFailed(errors));
        assert_eq!(render(&err), "Please fix the highlighted fields:\n  - email: is required\n");
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert!(matches!(err, AppError::Internal(_)));
        assert!(render(&err).contains("disk full"));
    }
}
