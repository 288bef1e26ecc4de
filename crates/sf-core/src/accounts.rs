//! Provider accounts, stored in `<base>/accounts.json`.
//!
//! Keyed by provider tag: [`HUB_KEY`] for the primary org identity and
//! [`HEROKU_KEY`] for the Heroku account. At most one record per tag.

use serde::{Deserialize, Serialize};

use crate::store::ConfigStore;

/// Accounts store filename.
pub const ACCOUNTS_FILE: &str = "accounts.json";

/// Provider tag for the hub org account.
pub const HUB_KEY: &str = "hub";

/// Provider tag for the Heroku account.
pub const HEROKU_KEY: &str = "heroku";

/// An account and the remote environments tracked under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Identity the account was logged in as
    pub user: String,
    /// Remote environment names (not necessarily connected)
    #[serde(default)]
    pub environments: Vec<String>,
    /// Token lifetime in seconds, when the provider honors one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
}

pub type Accounts = ConfigStore<AccountRecord>;
