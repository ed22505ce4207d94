use super::{ErrorCode, ErrorKey, ErrorMessage, ErrorMeta, RecordSyncError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Failure of an action run through the integration platform.
#[derive(ThisError, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteActionError {
    /// The platform answered with a non-success status. `data` is the raw error
    /// payload it sent back, vendor fault included.
    #[error("Integration action failed ({}): {}", .status, .message)]
    IntegrationApp {
        status: u16,
        message: String,
        data: Option<Value>,
    },
    /// The platform never produced an answer (network, TLS, undecodable body).
    #[error("Integration platform unreachable: {}", .message)]
    Transport { message: String },
}

impl RemoteActionError {
    pub fn integration_app(status: u16, message: &str, data: Option<Value>) -> RecordSyncError {
        RecordSyncError::remote(RemoteActionError::IntegrationApp {
            status,
            message: message.to_string(),
            data,
        })
    }

    pub fn transport(message: &str) -> RecordSyncError {
        RecordSyncError::remote(RemoteActionError::Transport {
            message: message.to_string(),
        })
    }

    pub fn error_data(&self) -> Option<&Value> {
        match self {
            RemoteActionError::IntegrationApp { data, .. } => data.as_ref(),
            RemoteActionError::Transport { .. } => None,
        }
    }

    pub fn vendor_fault(&self) -> Option<VendorFault> {
        self.error_data().and_then(VendorFault::decode)
    }

    /// Text shown to the customer: the vendor fault message when one can be
    /// decoded, the platform message otherwise.
    pub fn user_message(&self) -> String {
        if let Some(fault) = self.vendor_fault() {
            return fault.message;
        }

        match self {
            RemoteActionError::IntegrationApp { message, .. }
            | RemoteActionError::Transport { message } => message.clone(),
        }
    }
}

impl ErrorMeta for RemoteActionError {
    fn code(&self) -> ErrorCode {
        match self {
            RemoteActionError::IntegrationApp { .. } => ErrorCode(3000),
            RemoteActionError::Transport { .. } => ErrorCode(3001),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            RemoteActionError::IntegrationApp { .. } if self.vendor_fault().is_some() => {
                ErrorKey::remote("integration_app", Some("vendor_fault"))
            }
            RemoteActionError::IntegrationApp { .. } => ErrorKey::remote("integration_app", None),
            RemoteActionError::Transport { .. } => ErrorKey::remote("transport", None),
        }
    }

    fn message(&self) -> ErrorMessage {
        ErrorMessage(self.user_message())
    }
}

/// First entry of a QuickBooks style fault, found at `data.Fault.Error[0]` inside
/// the platform error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorFault {
    pub message: String,
    pub detail: Option<String>,
    pub code: Option<String>,
    pub fault_type: Option<String>,
}

impl VendorFault {
    /// Every level may be missing or of the wrong type; anything unexpected
    /// yields `None` instead of an error.
    pub fn decode(payload: &Value) -> Option<Self> {
        let fault = payload.get("data")?.get("Fault")?;
        let entry = fault.get("Error")?.as_array()?.first()?;

        Some(Self {
            message: text(entry.get("Message")?)?,
            detail: entry.get("Detail").and_then(text),
            code: entry.get("code").or_else(|| entry.get("Code")).and_then(text),
            fault_type: fault.get("type").and_then(text),
        })
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
