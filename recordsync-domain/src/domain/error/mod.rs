#[cfg(feature = "axum-error")]
pub mod axum_error;
pub mod remote;

pub use remote::*;

use http::StatusCode;
use mongodb::error::WriteFailure;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error as ThisError;

pub trait ErrorMeta {
    fn code(&self) -> ErrorCode;
    fn key(&self) -> ErrorKey;
    fn message(&self) -> ErrorMessage;
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorCode(u16);

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorKey(String);

impl ErrorKey {
    pub fn internal(key: &str, subtype: Option<&str>) -> Self {
        Self::scoped("internal", key, subtype)
    }

    pub fn application(key: &str, subtype: Option<&str>) -> Self {
        Self::scoped("application", key, subtype)
    }

    pub fn remote(key: &str, subtype: Option<&str>) -> Self {
        Self::scoped("remote", key, subtype)
    }

    fn scoped(scope: &str, key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::{scope}::{key}::{subtype}")),
            None => ErrorKey(format!("err::{scope}::{key}")),
        }
    }
}

impl Display for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorMessage(String);

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

fn subtype_key(subtype: &str) -> String {
    subtype
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InternalError {
    #[error("An unknown error occurred: {}", .message)]
    UnknownError {
        message: String,
        subtype: Option<String>,
    },
    #[error("A unique field violation occurred: {}", .message)]
    UniqueFieldViolation {
        message: String,
        subtype: Option<String>,
    },
    #[error("A connection error occurred: {}", .message)]
    ConnectionError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Argument provided is invalid: {}", .message)]
    InvalidArgument {
        message: String,
        subtype: Option<String>,
    },
    #[error("An error while performing an IO operation: {}", .message)]
    IOErr {
        message: String,
        subtype: Option<String>,
    },
    #[error("Signing error: {}", .message)]
    SigningError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Configuration error: {}", .message)]
    ConfigurationError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Serialization error: {}", .message)]
    SerializeError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Deserialization error: {}", .message)]
    DeserializeError {
        message: String,
        subtype: Option<String>,
    },
}

impl InternalError {
    pub fn unknown(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::UnknownError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn unique_field_violation(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::UniqueFieldViolation {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn connection_error(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::ConnectionError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn invalid_argument(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::InvalidArgument {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn io_err(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::IOErr {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn signing_error(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::SigningError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn configuration_error(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::ConfigurationError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn serialize_error(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::SerializeError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn deserialize_error(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::internal(InternalError::DeserializeError {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }
}

impl ErrorMeta for InternalError {
    fn code(&self) -> ErrorCode {
        match self {
            InternalError::UnknownError { .. } => ErrorCode(1000),
            InternalError::UniqueFieldViolation { .. } => ErrorCode(1001),
            InternalError::ConnectionError { .. } => ErrorCode(1003),
            InternalError::InvalidArgument { .. } => ErrorCode(1005),
            InternalError::IOErr { .. } => ErrorCode(1006),
            InternalError::SigningError { .. } => ErrorCode(1007),
            InternalError::ConfigurationError { .. } => ErrorCode(1009),
            InternalError::SerializeError { .. } => ErrorCode(1011),
            InternalError::DeserializeError { .. } => ErrorCode(1012),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            InternalError::UnknownError { subtype, .. } => {
                ErrorKey::internal("unknown", subtype.as_deref())
            }
            InternalError::UniqueFieldViolation { subtype, .. } => {
                ErrorKey::internal("unique_violation", subtype.as_deref())
            }
            InternalError::ConnectionError { subtype, .. } => {
                ErrorKey::internal("connection_error", subtype.as_deref())
            }
            InternalError::InvalidArgument { subtype, .. } => {
                ErrorKey::internal("invalid_argument", subtype.as_deref())
            }
            InternalError::IOErr { subtype, .. } => {
                ErrorKey::internal("io_err", subtype.as_deref())
            }
            InternalError::SigningError { subtype, .. } => {
                ErrorKey::internal("signing_error", subtype.as_deref())
            }
            InternalError::ConfigurationError { subtype, .. } => {
                ErrorKey::internal("configuration_error", subtype.as_deref())
            }
            InternalError::SerializeError { subtype, .. } => {
                ErrorKey::internal("serialize_error", subtype.as_deref())
            }
            InternalError::DeserializeError { subtype, .. } => {
                ErrorKey::internal("deserialize_error", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            InternalError::UnknownError { message, .. }
            | InternalError::UniqueFieldViolation { message, .. }
            | InternalError::ConnectionError { message, .. }
            | InternalError::InvalidArgument { message, .. }
            | InternalError::IOErr { message, .. }
            | InternalError::SigningError { message, .. }
            | InternalError::ConfigurationError { message, .. }
            | InternalError::SerializeError { message, .. }
            | InternalError::DeserializeError { message, .. } => ErrorMessage(message.to_string()),
        }
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationError {
    #[error("Bad Request: {}", .message)]
    BadRequest {
        message: String,
        subtype: Option<String>,
    },
    #[error("Not Found: {}", .message)]
    NotFound {
        message: String,
        subtype: Option<String>,
    },
    #[error("Unauthorized: {}", .message)]
    Unauthorized {
        message: String,
        subtype: Option<String>,
    },
}

impl ApplicationError {
    pub fn bad_request(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::application(ApplicationError::BadRequest {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn not_found(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::application(ApplicationError::NotFound {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }

    pub fn unauthorized(message: &str, subtype: Option<&str>) -> RecordSyncError {
        RecordSyncError::application(ApplicationError::Unauthorized {
            message: message.to_string(),
            subtype: subtype.map(subtype_key),
        })
    }
}

impl ErrorMeta for ApplicationError {
    fn code(&self) -> ErrorCode {
        match self {
            ApplicationError::BadRequest { .. } => ErrorCode(2000),
            ApplicationError::NotFound { .. } => ErrorCode(2005),
            ApplicationError::Unauthorized { .. } => ErrorCode(2010),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            ApplicationError::BadRequest { subtype, .. } => {
                ErrorKey::application("bad_request", subtype.as_deref())
            }
            ApplicationError::NotFound { subtype, .. } => {
                ErrorKey::application("not_found", subtype.as_deref())
            }
            ApplicationError::Unauthorized { subtype, .. } => {
                ErrorKey::application("unauthorized", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            ApplicationError::BadRequest { message, .. }
            | ApplicationError::NotFound { message, .. }
            | ApplicationError::Unauthorized { message, .. } => ErrorMessage(message.to_string()),
        }
    }
}

#[derive(ThisError, Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordSyncError {
    Internal(InternalError),
    Application(ApplicationError),
    Remote(RemoteActionError),
}

impl From<anyhow::Error> for RecordSyncError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast_ref::<RecordSyncError>() {
            Some(record_sync_error) => record_sync_error.clone(),
            None => RecordSyncError::Internal(InternalError::UnknownError {
                message: error.to_string(),
                subtype: None,
            }),
        }
    }
}

impl<'a> From<&'a RecordSyncError> for StatusCode {
    fn from(value: &'a RecordSyncError) -> Self {
        match value {
            RecordSyncError::Internal(e) => match e {
                InternalError::UniqueFieldViolation { .. } => StatusCode::CONFLICT,
                InternalError::ConnectionError { .. } => StatusCode::BAD_GATEWAY,
                InternalError::InvalidArgument { .. }
                | InternalError::SerializeError { .. }
                | InternalError::DeserializeError { .. } => StatusCode::BAD_REQUEST,
                InternalError::UnknownError { .. }
                | InternalError::IOErr { .. }
                | InternalError::SigningError { .. }
                | InternalError::ConfigurationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            RecordSyncError::Application(e) => match e {
                ApplicationError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApplicationError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            },
            // A failed vendor call is always surfaced as a server error, whatever the
            // platform answered with.
            RecordSyncError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RecordSyncError> for StatusCode {
    fn from(value: RecordSyncError) -> Self {
        (&value).into()
    }
}

impl From<mongodb::error::Error> for RecordSyncError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            mongodb::error::ErrorKind::InvalidArgument { message, .. } => {
                InternalError::invalid_argument(&message, None)
            }
            mongodb::error::ErrorKind::Authentication { message, .. } => {
                InternalError::connection_error(&message, Some("Authentication failed"))
            }
            mongodb::error::ErrorKind::BsonDeserialization(error) => {
                InternalError::deserialize_error(&error.to_string(), Some("BSON deserialization"))
            }
            mongodb::error::ErrorKind::BsonSerialization(error) => {
                InternalError::serialize_error(&error.to_string(), Some("BSON serialization"))
            }
            mongodb::error::ErrorKind::Command(error) => {
                if error.code == 11000 {
                    InternalError::unique_field_violation(&error.message, Some("Duplicate key"))
                } else {
                    InternalError::unknown(&error.message, Some("Command error"))
                }
            }
            mongodb::error::ErrorKind::DnsResolve { message, .. } => {
                InternalError::connection_error(&message, Some("DNS resolution failed"))
            }
            mongodb::error::ErrorKind::Io(error) => InternalError::io_err(&error.to_string(), None),
            mongodb::error::ErrorKind::ServerSelection { message, .. } => {
                InternalError::connection_error(&message, Some("Server selection failed"))
            }
            mongodb::error::ErrorKind::Write(WriteFailure::WriteError(error)) => {
                if error.code == 11000 {
                    InternalError::unique_field_violation(&error.message, Some("Duplicate key"))
                } else {
                    InternalError::unknown(&error.message, Some("Write error"))
                }
            }
            mongodb::error::ErrorKind::Write(WriteFailure::WriteConcernError(error)) => {
                InternalError::unknown(&error.message, Some("Write concern error"))
            }
            _ => InternalError::unknown("Unknown error", Some("Database error")),
        }
    }
}

impl RecordSyncError {
    fn internal(internal: InternalError) -> Self {
        RecordSyncError::Internal(internal)
    }

    fn application(application: ApplicationError) -> Self {
        RecordSyncError::Application(application)
    }

    pub(crate) fn remote(remote: RemoteActionError) -> Self {
        RecordSyncError::Remote(remote)
    }

    /// Body sent back to HTTP clients: the user-facing text under `error`, and for
    /// integration platform failures the raw payload under `errorData`.
    pub fn as_json(&self) -> Value {
        match self {
            RecordSyncError::Remote(remote) => match remote.error_data() {
                Some(data) => json!({
                    "error": remote.user_message(),
                    "errorData": data,
                }),
                None => json!({ "error": remote.user_message() }),
            },
            other => json!({ "error": other.message().to_string() }),
        }
    }
}

impl ErrorMeta for RecordSyncError {
    fn code(&self) -> ErrorCode {
        match self {
            RecordSyncError::Internal(e) => e.code(),
            RecordSyncError::Application(e) => e.code(),
            RecordSyncError::Remote(e) => e.code(),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            RecordSyncError::Internal(e) => e.key(),
            RecordSyncError::Application(e) => e.key(),
            RecordSyncError::Remote(e) => e.key(),
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            RecordSyncError::Internal(e) => e.message(),
            RecordSyncError::Application(e) => e.message(),
            RecordSyncError::Remote(e) => e.message(),
        }
    }
}

impl Display for RecordSyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordSyncError::Internal(e) => write!(f, "{}", e),
            RecordSyncError::Application(e) => write!(f, "{}", e),
            RecordSyncError::Remote(e) => write!(f, "{}", e),
        }
    }
}
