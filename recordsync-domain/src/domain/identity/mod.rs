use serde::{Deserialize, Serialize};

/// The authenticated customer a request acts for. Resolved once by the auth
/// middleware and handed to handlers explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
}

impl AuthContext {
    /// `None` when the customer id is missing or blank.
    pub fn resolve(customer_id: Option<&str>, customer_name: Option<&str>) -> Option<Self> {
        let customer_id = customer_id.map(str::trim).filter(|id| !id.is_empty())?;
        let customer_name = customer_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Some(Self {
            customer_id: customer_id.to_string(),
            customer_name,
        })
    }

    pub fn display_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(&self.customer_id)
    }
}
