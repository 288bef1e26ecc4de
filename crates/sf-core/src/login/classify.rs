//! Login URL classification.
//!
//! Turns a raw login URL plus flags into a [`LoginDecision`]. The only state
//! consulted is a read-only lookup in the environments store; nothing is
//! mutated here.

use serde::Serialize;
use tracing::debug;
use url::Url;

use super::naming::NamingPolicy;
use super::{LoginError, LoginRequest};
use crate::environments::Environments;

/// Suffix marking an identity as a sandbox.
pub const SANDBOX_SUFFIX: &str = ".sandbox";

/// Host suffixes a login URL may point at.
const SUPPORTED_DOMAINS: [&str; 2] = ["salesforce.com", "heroku.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Salesforce,
    Heroku,
}

impl Provider {
    fn for_domain(domain: &str) -> Self {
        if domain.contains("heroku") {
            Provider::Heroku
        } else {
            Provider::Salesforce
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Salesforce => "Salesforce",
            Provider::Heroku => "Heroku",
        }
    }
}

/// Outcome of classifying a login request. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDecision {
    /// Login URL host (with port, if non-default)
    pub domain: String,
    /// Resolved identity, `.sandbox`-suffixed when reclassified
    pub identity: String,
    pub provider: Provider,
    pub is_sandboxed: bool,
    pub alias: Option<String>,
    pub client_id: Option<String>,
    pub expires_in: Option<u64>,
}

impl LoginDecision {
    pub fn is_heroku(&self) -> bool {
        self.provider == Provider::Heroku
    }
}

/// Prefixes `https://` when the URL has no scheme.
pub fn normalize_login_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// True when the text before the first `://` is a URL scheme
/// (a letter followed by letters, digits, `+`, `-` or `.`).
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalizes and parses a login URL, rejecting unsupported hosts.
///
/// # Errors
/// Returns [`LoginError::InvalidLoginUrl`] if the URL can't be parsed and
/// [`LoginError::UnsupportedProvider`] if its host isn't a supported domain.
pub fn resolve_login_url(raw: &str) -> Result<Url, LoginError> {
    let normalized = normalize_login_url(raw);
    let url = Url::parse(&normalized).map_err(|source| LoginError::InvalidLoginUrl {
        url: normalized.clone(),
        source,
    })?;

    let host = url.host_str().unwrap_or_default();
    if !SUPPORTED_DOMAINS.iter().any(|domain| host.ends_with(domain)) {
        return Err(LoginError::UnsupportedProvider {
            host: host.to_string(),
        });
    }

    Ok(url)
}

fn domain_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Appends [`SANDBOX_SUFFIX`] unless the identity already carries it.
pub fn with_sandbox_suffix(identity: String) -> String {
    if identity.ends_with(SANDBOX_SUFFIX) {
        identity
    } else {
        identity + SANDBOX_SUFFIX
    }
}

/// Classifies a login request against the current environments.
///
/// An identity that already has an environment record, or whose domain
/// contains `test`, is treated as a sandbox.
///
/// # Errors
/// Returns an error if the login URL is invalid or unsupported.
pub fn classify(
    request: &LoginRequest,
    environments: &Environments,
    naming: &dyn NamingPolicy,
) -> Result<LoginDecision, LoginError> {
    let url = resolve_login_url(&request.login_url)?;
    let domain = domain_of(&url);

    let candidate = naming.identity(&domain);
    let seen_before = environments.contains(&candidate);
    let identity = if seen_before || domain.contains("test") {
        with_sandbox_suffix(candidate)
    } else {
        candidate
    };

    let provider = Provider::for_domain(&domain);
    let is_sandboxed = identity.contains("sandbox");

    debug!(
        %domain,
        %identity,
        provider = provider.display_name(),
        seen_before,
        is_sandboxed,
        "login classified"
    );

    Ok(LoginDecision {
        domain,
        identity,
        provider,
        is_sandboxed,
        alias: request.alias.clone(),
        client_id: request.client_id.clone(),
        expires_in: request.expires_in,
    })
}
