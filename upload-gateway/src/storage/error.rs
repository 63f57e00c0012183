//! Storage provider error types

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Failures reported by (or while talking to) the storage provider.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{operation} rejected by storage provider ({code}): {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
        status: Option<u16>,
    },

    #[error("{operation} timed out waiting for storage provider")]
    Timeout { operation: &'static str },

    #[error("{operation} could not reach storage provider: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to sign {operation} request: {message}")]
    Signing {
        operation: &'static str,
        message: String,
    },

    #[error("Storage provider response for {operation} is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Classify an SDK failure for `operation`.
    pub fn from_sdk<E>(operation: &'static str, err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        match &err {
            SdkError::ServiceError(context) => Self::Service {
                operation,
                code: context.err().code().unwrap_or("Unknown").to_string(),
                message: context
                    .err()
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| context.err().to_string()),
                status: Some(context.raw().status().as_u16()),
            },
            SdkError::TimeoutError(_) => Self::Timeout { operation },
            SdkError::ConstructionFailure(_) => Self::Signing {
                operation,
                message: DisplayErrorContext(&err).to_string(),
            },
            _ => Self::Transport {
                operation,
                message: DisplayErrorContext(&err).to_string(),
            },
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            StorageError::Service { operation, .. }
            | StorageError::Timeout { operation }
            | StorageError::Transport { operation, .. }
            | StorageError::Signing { operation, .. }
            | StorageError::MissingField { operation, .. } => *operation,
        }
    }

    /// Provider error code, when the provider returned one.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            StorageError::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status the provider answered with, when it answered at all.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            StorageError::Service { status, .. } => *status,
            _ => None,
        }
    }

    /// HTTP status the gateway should answer with.
    ///
    /// Provider 4xx answers (unknown upload, bad part list, access denied) are
    /// passed through; everything else is a gateway failure.
    pub fn http_status_code(&self) -> u16 {
        match self {
            StorageError::Service {
                status: Some(status),
                ..
            } if (400..500).contains(status) => *status,
            StorageError::Timeout { .. } => 504,
            _ => 502,
        }
    }
}
