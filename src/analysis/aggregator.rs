// Aggregation engine — routes chat events into the run's counters.
//
// One `RunSession` per chat connection: it holds the start timestamp
// (which names the report artifacts) and both live tables. A reconnect
// builds a fresh session, so stats never leak across connections.

use chrono::Utc;
use tracing::info;

use crate::analysis::normalize::normalize_message;
use crate::analysis::stats::{UserLedger, WordFrequencyTable};
use crate::config::RunConfig;

/// Timestamp format used in report file names, UTC.
pub const START_TIME_FORMAT: &str = "%y-%m-%d-%H-%M";

/// Everything accumulated over one chat connection's lifetime.
#[derive(Debug)]
pub struct RunSession {
    /// Wall-clock start of the session, preformatted for artifact names.
    pub started_at: String,
    pub users: UserLedger,
    pub words: WordFrequencyTable,
}

impl RunSession {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now().format(START_TIME_FORMAT).to_string(),
            users: UserLedger::new(),
            words: WordFrequencyTable::new(),
        }
    }
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes each incoming (user, text) event into the session's counters.
///
/// The config is injected at construction and read-only for the run;
/// settings edits apply to the next session, never mid-run. The run loop
/// owns the aggregator outright, so updates are strictly one at a time.
pub struct Aggregator {
    config: RunConfig,
    session: RunSession,
}

impl Aggregator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            session: RunSession::new(),
        }
    }

    /// Count one chat message.
    ///
    /// Excluded users and messages that normalize to nothing are silent
    /// no-ops — neither creates a user entry nor touches the word table.
    /// Everything else updates the sender's accumulator (created on first
    /// sight) and increments every token's global count.
    pub fn handle_message(&mut self, username: &str, raw_text: &str) {
        let username = username.to_lowercase();
        if self.config.excluded_users.contains(&username) {
            return;
        }

        let tokens = normalize_message(raw_text);
        if tokens.is_empty() {
            return;
        }

        let stats = self.session.users.get_or_create(&username);
        stats.update(&tokens);
        let messages = stats.messages;

        for token in &tokens {
            self.session.words.record(token);
        }

        if self.config.logging {
            info!(user = %username, messages, "Message counted");
        }
    }

    pub fn session(&self) -> &RunSession {
        &self.session
    }

    /// Hand the accumulated session over for scoring once the run ends.
    pub fn into_session(self) -> RunSession {
        self.session
    }
}
