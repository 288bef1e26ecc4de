//! Naming policy for login identities and the environments derived from them.
//!
//! There is no token exchange, so identities and remote environment names are
//! synthesized. The orchestrator only depends on [`NamingPolicy`], so a real
//! provider lookup can replace [`PlaceholderNaming`] without touching it.

/// Derives identities and environment names.
pub trait NamingPolicy {
    /// Candidate identity for a login to `domain`.
    fn identity(&self, domain: &str) -> String;

    /// Remote environments tracked under a newly created hub account.
    fn hub_environments(&self, identity: &str) -> Vec<String>;

    /// Remote environments tracked under a Heroku account.
    fn heroku_environments(&self, identity: &str) -> Vec<String>;
}

/// Fixed, deterministic names.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderNaming;

const HEROKU_ENVIRONMENTS: [&str; 6] = [
    "heroku-app-1",
    "heroku-app-2",
    "heroku-app-3",
    "functions-env-1",
    "functions-env-2",
    "functions-env-3",
];

impl NamingPolicy for PlaceholderNaming {
    fn identity(&self, domain: &str) -> String {
        format!("myuser-{domain}@mycompany.com")
    }

    fn hub_environments(&self, identity: &str) -> Vec<String> {
        vec![
            format!("{identity}.scratch1"),
            format!("{identity}.scratch2"),
            format!("{identity}.scratch3"),
            format!("{}.sandbox", identity.replacen("login", "test", 1)),
        ]
    }

    fn heroku_environments(&self, _identity: &str) -> Vec<String> {
        HEROKU_ENVIRONMENTS.iter().map(|s| (*s).to_string()).collect()
    }
}
