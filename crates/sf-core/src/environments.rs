//! Connected environments, stored in `<base>/environments.json`.
//!
//! Keyed by identity. A key being present means the identity has logged in
//! before. Heroku identities never appear here.

use serde::{Deserialize, Serialize};

use crate::store::ConfigStore;

/// Environments store filename.
pub const ENVIRONMENTS_FILE: &str = "environments.json";

/// Status recorded for a freshly logged-in environment.
pub const STATUS_CONNECTED: &str = "Connected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    Org,
}

/// Whether an org is the hub itself or a sandbox under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentContext {
    Hub,
    Sandbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub connected: bool,
    pub status: String,
    #[serde(rename = "type")]
    pub env_type: EnvironmentType,
    pub context: EnvironmentContext,
}

impl EnvironmentRecord {
    /// A connected org record in the given context.
    pub fn connected_org(context: EnvironmentContext) -> Self {
        Self {
            connected: true,
            status: STATUS_CONNECTED.to_string(),
            env_type: EnvironmentType::Org,
            context,
        }
    }
}

pub type Environments = ConfigStore<EnvironmentRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record = EnvironmentRecord::connected_org(EnvironmentContext::Sandbox);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "connected": true,
                "status": "Connected",
                "type": "org",
                "context": "sandbox",
            })
        );
    }

    #[test]
    fn test_unknown_context_is_rejected() {
        let parsed: Result<EnvironmentRecord, _> = serde_json::from_str(
            r#"{"connected": true, "status": "Connected", "type": "org", "context": "prod"}"#,
        );
        assert!(parsed.is_err());
    }
}
