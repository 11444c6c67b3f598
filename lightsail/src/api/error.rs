use aws_sdk_lightsail::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

const NOT_FOUND_CODE: &str = "NotFoundException";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Lightsail {kind} ({name}) not found")]
    NotFound { kind: &'static str, name: String },

    #[error("Lightsail {operation} failed: {message}")]
    Service {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("Lightsail {kind} ({name}) response is missing {field}")]
    MissingField {
        kind: &'static str,
        name: String,
        field: &'static str,
    },
}

impl ApiError {
    pub(crate) fn from_sdk<E, R>(
        operation: &'static str,
        kind: &'static str,
        name: &str,
        err: SdkError<E, R>,
    ) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let code = err.code().map(str::to_string);
        tracing::debug!(
            "failed to call service: lightsail, operation: {}, code: {:?}",
            operation,
            code
        );

        if code.as_deref() == Some(NOT_FOUND_CODE) {
            return ApiError::NotFound {
                kind,
                name: name.to_string(),
            };
        }

        ApiError::Service {
            operation,
            code,
            message: DisplayErrorContext(&err).to_string(),
        }
    }

    pub(crate) fn missing(kind: &'static str, name: &str, field: &'static str) -> Self {
        ApiError::MissingField {
            kind,
            name: name.to_string(),
            field,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Read-side recovery for resources that disappeared outside Terraform.
pub trait NotFoundExt<T> {
    /// `Ok(None)` when the resource is gone, any other error unchanged
    fn found(self) -> Result<Option<T>, ApiError>;
}

impl<T> NotFoundExt<T> for Result<T, ApiError> {
    fn found(self) -> Result<Option<T>, ApiError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => {
                tracing::warn!("{}, removing from state", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
