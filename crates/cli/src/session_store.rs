//! On-disk session persistence for the CLI.
//!
//! One JSON file under the user config directory holds the current
//! [`SessionContext`]. Commands that need authentication load it and
//! fail with a sign-in hint when it is absent, the CLI analogue of
//! redirecting to the login page.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use quizmaker_client::SessionContext;

const APP_DIR: &str = "quizmaker";
const SESSION_FILE: &str = "session.json";

fn session_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("No user config directory available"))?;
    Ok(base.join(APP_DIR).join(SESSION_FILE))
}

/// Persist a session, replacing any previous one.
pub fn save(session: &SessionContext) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Creating session directory")?;
    }
    let json = serde_json::to_string_pretty(session)?;
    fs::write(&path, json).with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}

/// Load the stored session, if any.
pub fn load() -> Result<Option<SessionContext>> {
    let path = session_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
    let session = serde_json::from_str(&json).context("Parsing stored session")?;
    Ok(Some(session))
}

/// Remove the stored session. Missing file is fine.
pub fn clear() -> Result<()> {
    let path = session_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Removing {}", path.display())),
    }
}

/// Load the stored session or fail with the sign-in hint.
pub fn require() -> Result<SessionContext> {
    load()?.ok_or_else(|| anyhow!("Not signed in. Run `quizmaker login <email>` first."))
}
