//! Login flow.
//!
//! Classifies a login URL ([`classify`]) and records the result across the
//! accounts, environments and aliases stores ([`apply`]). Stores are staged in
//! memory and flushed once at the end; a failed flush does not roll back the
//! stores written before it.

pub mod classify;
pub mod naming;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use self::classify::{
    LoginDecision, Provider, classify, normalize_login_url, resolve_login_url,
};
pub use self::naming::{NamingPolicy, PlaceholderNaming};
use crate::accounts::{ACCOUNTS_FILE, AccountRecord, Accounts, HEROKU_KEY, HUB_KEY};
use crate::aliases::{ALIASES_FILE, Aliases};
use crate::environments::{
    ENVIRONMENTS_FILE, EnvironmentContext, EnvironmentRecord, Environments,
};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LoginError {
    /// The login URL's host isn't a supported provider domain.
    #[error("sf only supports logging into salesforce.com and heroku.com (got '{host}')")]
    UnsupportedProvider { host: String },
    #[error("Invalid login URL '{url}'")]
    InvalidLoginUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Flags accepted by `sf login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoginRequest {
    pub login_url: String,
    pub alias: Option<String>,
    pub browser: Option<String>,
    pub client_id: Option<String>,
    pub expires_in: Option<u64>,
}

/// The three stores a login reads and writes.
#[derive(Debug)]
pub struct Stores {
    pub accounts: Accounts,
    pub environments: Environments,
    pub aliases: Aliases,
}

impl Stores {
    /// Loads all three stores from `dir`.
    ///
    /// # Errors
    /// Returns an error if any store file exists but can't be read or parsed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            accounts: Accounts::create(dir.join(ACCOUNTS_FILE))?,
            environments: Environments::create(dir.join(ENVIRONMENTS_FILE))?,
            aliases: Aliases::create(dir.join(ALIASES_FILE))?,
        })
    }

    /// Writes every store with pending changes, in the order aliases,
    /// environments, accounts. Stops at the first failure.
    ///
    /// # Errors
    /// Returns the first [`StoreError::PersistenceFailure`] encountered.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.aliases.is_dirty() {
            self.aliases.write()?;
        }
        if self.environments.is_dirty() {
            self.environments.write()?;
        }
        if self.accounts.is_dirty() {
            self.accounts.write()?;
        }
        Ok(())
    }
}

/// Result of a login, after the stores were updated in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub decision: LoginDecision,
    /// A hub account was bootstrapped by this login
    pub hub_created: bool,
    /// `expires_in` was recorded on the account
    pub expiration_applied: bool,
    /// Non-fatal problems to surface to the user
    pub warnings: Vec<String>,
}

impl LoginOutcome {
    /// Human-readable status lines.
    pub fn summary(&self) -> String {
        let decision = &self.decision;
        let mut status = format!("Logged in as {}", decision.identity);
        if let Some(alias) = &decision.alias {
            status.push_str(&format!("\n   with alias {alias}"));
        }
        if let Some(client_id) = &decision.client_id {
            status.push_str(&format!("\n   with connected app {client_id}"));
        }
        if self.expiration_applied
            && let Some(expires_in) = decision.expires_in
        {
            status.push_str(&format!("\n   and expires in {expires_in}"));
        }
        status
    }

    /// The result payload: resolved flags, parsed domain and identity.
    pub fn payload<'a>(&'a self, flags: &'a LoginRequest) -> LoginPayload<'a> {
        LoginPayload {
            flags,
            domain: &self.decision.domain,
            user: &self.decision.identity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPayload<'a> {
    pub flags: &'a LoginRequest,
    pub domain: &'a str,
    pub user: &'a str,
}

/// Applies a login decision to the stores in memory. Never fails; nothing is
/// persisted until [`Stores::flush`].
pub fn apply(
    decision: LoginDecision,
    stores: &mut Stores,
    naming: &dyn NamingPolicy,
) -> LoginOutcome {
    let identity = decision.identity.as_str();
    let mut warnings = Vec::new();

    if let Some(alias) = &decision.alias {
        stores.aliases.set(alias.as_str(), identity.to_string());
    }

    let mut hub_created = false;
    let expiration_applied = decision.is_heroku() && decision.expires_in.is_some();

    if decision.is_heroku() {
        stores.accounts.set(
            HEROKU_KEY,
            AccountRecord {
                user: identity.to_string(),
                environments: naming.heroku_environments(identity),
                expires: decision.expires_in,
            },
        );
    } else {
        if decision.expires_in.is_some() {
            let message = format!("Can not set token expiration date for {}", decision.domain);
            warn!("{message}");
            warnings.push(message);
        }

        if stores.accounts.get(HUB_KEY).is_none() && !decision.is_sandboxed {
            stores.accounts.set(
                HUB_KEY,
                AccountRecord {
                    user: identity.to_string(),
                    environments: naming.hub_environments(identity),
                    expires: None,
                },
            );
            hub_created = true;
        }

        let context = if decision.is_sandboxed {
            EnvironmentContext::Sandbox
        } else {
            EnvironmentContext::Hub
        };
        stores
            .environments
            .set(identity, EnvironmentRecord::connected_org(context));
    }

    debug!(identity, hub_created, expiration_applied, "login applied");

    LoginOutcome {
        decision,
        hub_created,
        expiration_applied,
        warnings,
    }
}

/// Runs the full login: classify, apply, flush.
///
/// # Errors
/// Returns an error if the login URL is rejected (before anything is
/// modified) or a store can't be written.
pub fn login(
    request: &LoginRequest,
    stores: &mut Stores,
    naming: &dyn NamingPolicy,
) -> Result<LoginOutcome, LoginError> {
    let decision = classify(request, &stores.environments, naming)?;
    let outcome = apply(decision, stores, naming);
    stores.flush()?;
    Ok(outcome)
}
