use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_RECORD_ACTION: &str = "get-accounts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordActionType {
    Default,
    Custom,
}

/// A record type the UI manages, keyed by the integration action that lists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordAction {
    pub key: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub r#type: RecordActionType,
}

pub const RECORD_ACTIONS: &[RecordAction] = &[RecordAction {
    key: DEFAULT_RECORD_ACTION,
    name: "Accounts",
    r#type: RecordActionType::Default,
}];

impl RecordAction {
    pub fn find(key: &str) -> Option<&'static RecordAction> {
        RECORD_ACTIONS.iter().find(|action| action.key == key)
    }

    /// Schema name behind the action: `get-accounts` lists `accounts`.
    pub fn schema_name(&self) -> &'static str {
        self.key.strip_prefix("get-").unwrap_or(self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RecordOperation {
    Create,
    Update,
    Delete,
}

/// A mutation pushed to the external system, carrying exactly what the remote
/// action expects as input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordMutation<'a> {
    Create {
        fields: &'a Map<String, Value>,
    },
    Update {
        id: &'a str,
        fields: &'a Map<String, Value>,
    },
    Delete {
        id: &'a str,
    },
}

impl RecordMutation<'_> {
    pub fn operation(&self) -> RecordOperation {
        match self {
            RecordMutation::Create { .. } => RecordOperation::Create,
            RecordMutation::Update { .. } => RecordOperation::Update,
            RecordMutation::Delete { .. } => RecordOperation::Delete,
        }
    }

    pub fn input(&self) -> Value {
        match self {
            RecordMutation::Create { fields } => json!({ "fields": fields }),
            RecordMutation::Update { id, fields } => json!({
                "input": {
                    "id": id,
                    "fields": fields,
                }
            }),
            RecordMutation::Delete { id } => json!({ "id": id }),
        }
    }
}
