use crate::action::RecordOperation;
use envconfig::Envconfig;
use std::fmt::{Display, Formatter, Result};

/// Keys of the integration actions each record mutation runs.
#[derive(Debug, Clone, Envconfig)]
pub struct ActionsConfig {
    #[envconfig(from = "CREATE_ACTION_KEY", default = "create-ledger-account")]
    pub create_action_key: String,
    #[envconfig(from = "UPDATE_ACTION_KEY", default = "update-ledger-account")]
    pub update_action_key: String,
    #[envconfig(from = "DELETE_ACTION_KEY", default = "delete-ledger-account")]
    pub delete_action_key: String,
}

impl ActionsConfig {
    pub fn key_for(&self, operation: RecordOperation) -> &str {
        match operation {
            RecordOperation::Create => &self.create_action_key,
            RecordOperation::Update => &self.update_action_key,
            RecordOperation::Delete => &self.delete_action_key,
        }
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            create_action_key: "create-ledger-account".to_owned(),
            update_action_key: "update-ledger-account".to_owned(),
            delete_action_key: "delete-ledger-account".to_owned(),
        }
    }
}

impl Display for ActionsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "CREATE_ACTION_KEY: {}", self.create_action_key)?;
        writeln!(f, "UPDATE_ACTION_KEY: {}", self.update_action_key)?;
        writeln!(f, "DELETE_ACTION_KEY: {}", self.delete_action_key)
    }
}
