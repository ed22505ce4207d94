use crate::action::RecordAction;
use serde_json::{json, Map, Value};

/// Default JSON schema for a record type, looked up either by schema name
/// (`accounts`) or by the record action listing it (`get-accounts`).
pub fn default_schema(record_type: &str) -> Option<Value> {
    let name = RecordAction::find(record_type)
        .map(RecordAction::schema_name)
        .unwrap_or(record_type);

    match name {
        "accounts" => Some(accounts_schema()),
        _ => None,
    }
}

fn accounts_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "title": "ID", "readOnly": true },
            "name": { "type": "string", "title": "Name" },
            "code": { "type": "string", "title": "Code" },
            "description": { "type": "string", "title": "Description" },
            "classification": {
                "type": "string",
                "title": "Classification",
                "enum": ["Asset", "Liability", "Equity", "Revenue", "Expense"]
            },
            "type": { "type": "string", "title": "Type" },
            "status": {
                "type": "string",
                "title": "Status",
                "enum": ["Active", "Inactive", "Archived"]
            },
            "currentBalance": { "type": "number", "title": "Current Balance" },
            "currency": { "type": "string", "title": "Currency" },
            "taxRateId": { "type": "string", "title": "Tax Rate ID" },
            "companyId": { "type": "string", "title": "Company ID" },
            "createdTime": {
                "type": "string",
                "title": "Created Time",
                "format": "date-time",
                "readOnly": true
            },
            "createdBy": { "type": "string", "title": "Created By", "readOnly": true },
            "updatedTime": {
                "type": "string",
                "title": "Updated Time",
                "format": "date-time",
                "readOnly": true
            },
            "updatedBy": { "type": "string", "title": "Updated By", "readOnly": true }
        },
        "required": ["id", "name"]
    })
}

/// Editable subset of a schema: `id` and read-only properties are dropped, and
/// `required` only keeps what is still present.
pub fn form_schema(schema: &Value) -> Value {
    let mut form = schema.clone();

    let Some(properties) = form.get("properties").and_then(Value::as_object) else {
        return form;
    };

    let editable: Map<String, Value> = properties
        .iter()
        .filter(|(name, property)| name.as_str() != "id" && !is_read_only(property))
        .map(|(name, property)| (name.clone(), property.clone()))
        .collect();

    let required: Option<Vec<Value>> = form
        .get("required")
        .and_then(Value::as_array)
        .map(|required| {
            required
                .iter()
                .filter(|name| name.as_str().is_some_and(|n| editable.contains_key(n)))
                .cloned()
                .collect()
        });

    if let Some(object) = form.as_object_mut() {
        object.insert("properties".to_string(), Value::Object(editable));
        if let Some(required) = required {
            object.insert("required".to_string(), Value::Array(required));
        }
    }

    form
}

fn is_read_only(property: &Value) -> bool {
    property
        .get("readOnly")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
