use bson::{doc, Document};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EXTERNAL_ID_FIELD: &str = "ExternalId";

/// Local mirror of an entity owned by an external system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub customer_id: String,
    pub record_type: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        record_type: impl Into<String>,
        fields: Map<String, Value>,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            record_type: record_type.into(),
            fields,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Identifier the remote system knows this record by. `fields.ExternalId`
    /// wins when it holds a non-empty string or a number, the local id otherwise.
    pub fn external_id(&self) -> String {
        match self.fields.get(EXTERNAL_ID_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => self.id.clone(),
        }
    }

    pub fn scope(&self) -> RecordScope<'_> {
        RecordScope::new(&self.id, &self.customer_id)
    }
}

/// The `(id, customerId)` pair every local lookup and delete is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordScope<'a> {
    pub id: &'a str,
    pub customer_id: &'a str,
}

impl<'a> RecordScope<'a> {
    pub fn new(id: &'a str, customer_id: &'a str) -> Self {
        Self { id, customer_id }
    }

    pub fn filter(&self) -> Document {
        doc! {
            "id": self.id,
            "customerId": self.customer_id,
        }
    }

    pub fn index_keys() -> Document {
        doc! {
            "id": 1,
            "customerId": 1,
        }
    }
}
