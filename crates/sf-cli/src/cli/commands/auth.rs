//! Auth command handlers.

use anyhow::{Context, Result};
use sf_core::config::{Settings, paths};
use sf_core::login::{self, LoginRequest, PlaceholderNaming, Stores};
use tracing::{debug, warn};

pub fn login(request: &LoginRequest, settings: &Settings, json: bool) -> Result<()> {
    // Reject unsupported providers before touching the browser or the stores.
    login::resolve_login_url(&request.login_url)?;
    let login_url = login::normalize_login_url(&request.login_url);

    let browser = request.browser.as_deref().or(settings.browser.as_deref());
    println!("Opening {} at {}...", browser.unwrap_or("browser"), login_url);
    println!();
    open_browser(&login_url, browser, settings);

    let home = paths::sf_home();
    let mut stores =
        Stores::open(&home).with_context(|| format!("load stores from {}", home.display()))?;
    let outcome = login::login(request, &mut stores, &PlaceholderNaming)?;

    for warning in &outcome.warnings {
        eprintln!("Warning: {warning}");
    }
    println!("{}", outcome.summary());

    if json {
        let payload = serde_json::to_string_pretty(&outcome.payload(request))
            .context("serialize login result")?;
        println!("{payload}");
    }

    Ok(())
}

/// Best effort; skipped in tests and when disabled in config.
fn open_browser(url: &str, browser: Option<&str>, settings: &Settings) {
    if std::env::var("SF_NO_BROWSER").is_ok() || !settings.open_browser {
        debug!("browser launch disabled");
        return;
    }

    let result = match browser {
        Some(app) => open::with(url, app),
        None => open::that(url),
    };
    if let Err(err) = result {
        warn!(%err, "failed to open browser");
    }
}
