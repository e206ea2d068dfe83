use crate::report::{write_match, write_summary};
use anyhow::{Context as _, Result};
use leakscan_config as config;
use leakscan_core::domain::NormalizedContact;
use leakscan_store::{paths, Store};
use leakscan_sync::{Credentials, FeedClient, FeedOptions};
use std::io::{self, Write};
use tracing::debug;

/// Fetches the contact list, normalizes every number and reports the
/// contacts found in the breach records.
pub fn scan(credentials: Credentials) -> Result<()> {
    let app_config = config::load().with_context(|| "load config")?;
    match config::active_config_path() {
        Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
        Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
        Err(err) => debug!(error = %err, "config unavailable"),
    }

    let options = FeedOptions {
        feed_url: app_config.feed.url.clone(),
        user_agent: Some(app_config.feed.user_agent.clone()),
        page_size: app_config.feed.page_size,
    };
    let mut client = FeedClient::login(options, credentials)
        .with_context(|| format!("log in to {}", app_config.feed.url))?;

    let db_path = paths::resolve_db_path(app_config.database.path.clone())
        .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");
    let store = Store::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;

    let contacts = client
        .list_contacts()?
        .map(|contact| contact.map(NormalizedContact::from).map_err(anyhow::Error::from));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_err: Option<io::Error> = None;
    let summary = store.matcher().run(contacts, |name, record| {
        if write_err.is_none() {
            if let Err(err) = write_match(&mut out, name, record) {
                write_err = Some(err);
            }
        }
    })?;
    if let Some(err) = write_err {
        return Err(err).context("write report");
    }

    write_summary(&mut out, &summary)?;
    out.flush()?;
    Ok(())
}
