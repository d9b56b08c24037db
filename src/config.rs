// Persisted settings and the per-run configuration view.
//
// Non-secret settings live in a flat JSON file next to the binary's
// working directory; the chat token comes from the environment (a .env
// file is loaded at startup via dotenvy) and is never written to disk.

use std::collections::{BTreeSet, HashSet};
use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings file name, relative to the working directory.
pub const SETTINGS_FILE: &str = "yapmeter_settings.json";

/// Environment variable holding the Twitch chat OAuth token.
/// Optional — without it the bot connects anonymously (read-only).
pub const TOKEN_ENV_VAR: &str = "YAPMETER_TOKEN";

/// User-editable settings, persisted as pretty JSON.
///
/// Unknown keys in the file are ignored and missing keys fall back to
/// defaults, so the file survives version changes in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Channel whose chat gets counted. Stored lower-cased.
    pub target_channel: String,
    /// Users whose messages are never counted (bots, the broadcaster).
    /// Lower-cased; a sorted set keeps the saved file diff-friendly.
    pub excluded_users: BTreeSet<String>,
    /// Emit a per-message counter line while the bot runs.
    pub logging: bool,
    /// Blank lines prefixed to the condensed report files, so a stream
    /// overlay can crop the table into view.
    pub padding: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_channel: String::new(),
            excluded_users: BTreeSet::new(),
            logging: true,
            padding: 0,
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing file is created with defaults. An unparseable file is
    /// rewritten with defaults rather than aborting — losing a corrupt
    /// settings file beats refusing to start.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        match serde_json::from_str::<Self>(&raw) {
            Ok(mut settings) => {
                settings.normalize();
                Ok(settings)
            }
            Err(err) => {
                warn!(error = %err, "Settings file unparseable, rewriting with defaults");
                let settings = Self::default();
                settings.save(path)?;
                Ok(settings)
            }
        }
    }

    /// Write the settings to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write settings file {}", path.display()))
    }

    /// Case-normalize everything that is matched against chat input.
    fn normalize(&mut self) {
        self.target_channel = self.target_channel.trim().to_lowercase();
        self.excluded_users = self
            .excluded_users
            .iter()
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty())
            .collect();
    }

    /// Add `user` to the excluded set, or remove it if already present.
    /// Returns true if the user is excluded afterwards.
    pub fn toggle_excluded(&mut self, user: &str) -> bool {
        let user = user.trim().to_lowercase();
        if self.excluded_users.remove(&user) {
            false
        } else {
            self.excluded_users.insert(user);
            true
        }
    }

    /// Check that a target channel is configured.
    /// Call this before any operation that connects to chat.
    pub fn require_channel(&self) -> Result<()> {
        if self.target_channel.is_empty() {
            anyhow::bail!(
                "No target channel set. Run `yapmeter settings` to configure one,\n\
                 or pass --channel <name> to `yapmeter run`."
            );
        }
        Ok(())
    }

    /// The read-only view handed to the aggregation engine for one run.
    /// Settings edits after this point apply to the next run.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            channel: self.target_channel.clone(),
            excluded_users: self.excluded_users.iter().cloned().collect(),
            logging: self.logging,
        }
    }

    /// The chat token from the environment, if one is set and non-empty.
    pub fn chat_token() -> Option<String> {
        env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.trim().is_empty())
    }
}

/// Frozen per-run configuration consumed by the aggregation engine.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub channel: String,
    pub excluded_users: HashSet<String>,
    pub logging: bool,
}
