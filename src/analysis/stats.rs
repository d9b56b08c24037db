// Running counters — per-user accumulators and the global word table.
//
// Both collections are insertion-ordered on purpose: the ranking engine
// breaks ties by first appearance, so "who showed up first" has to be an
// observable, contractual property of the containers rather than an
// accident of hash iteration.

use std::collections::{HashMap, HashSet};

/// Running statistics for one chatter.
///
/// Created lazily on a user's first counted message and only ever grows
/// from there — nothing resets an accumulator short of starting a new
/// run session.
#[derive(Debug, Clone)]
pub struct UserStats {
    pub username: String,
    /// Characters across all counted tokens (token lengths summed,
    /// whitespace excluded). Counted in chars, not bytes.
    pub letter_count: u64,
    /// Total tokens counted, repeats included. Distinct from vocabulary.
    pub word_count: u64,
    /// Messages that contributed at least one token.
    pub messages: u64,
    /// Every distinct token this user has ever sent.
    pub unique_words: HashSet<String>,
}

impl UserStats {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            letter_count: 0,
            word_count: 0,
            messages: 0,
            unique_words: HashSet::new(),
        }
    }

    /// Fold one message's tokens into the counters.
    ///
    /// Callers pass a non-empty token list — empty messages are filtered
    /// out before an accumulator is ever touched, so `messages` counts
    /// only messages that actually said something.
    pub fn update(&mut self, tokens: &[String]) {
        self.letter_count += tokens.iter().map(|t| t.chars().count() as u64).sum::<u64>();
        self.word_count += tokens.len() as u64;
        self.messages += 1;
        self.unique_words.extend(tokens.iter().cloned());
    }

    pub fn vocab_size(&self) -> usize {
        self.unique_words.len()
    }

    /// Mean counted characters per message.
    ///
    /// Requires `messages > 0`. Accumulators only exist after their first
    /// update, so the scoring engine can rely on this structurally.
    pub fn average_message_length(&self) -> f64 {
        self.letter_count as f64 / self.messages as f64
    }
}

/// Insertion-ordered map of username to accumulator.
///
/// `get_or_create` is the sole insertion path; iteration yields users in
/// order of first counted message.
#[derive(Debug, Default)]
pub struct UserLedger {
    index: HashMap<String, usize>,
    users: Vec<UserStats>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a user's accumulator, creating an empty one on first sight.
    pub fn get_or_create(&mut self, username: &str) -> &mut UserStats {
        let slot = match self.index.get(username) {
            Some(&slot) => slot,
            None => {
                let slot = self.users.len();
                self.index.insert(username.to_string(), slot);
                self.users.push(UserStats::new(username));
                slot
            }
        };
        &mut self.users[slot]
    }

    pub fn get(&self, username: &str) -> Option<&UserStats> {
        self.index.get(username).map(|&slot| &self.users[slot])
    }

    pub fn contains(&self, username: &str) -> bool {
        self.index.contains_key(username)
    }

    /// Users in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &UserStats> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Insertion-ordered token -> occurrence count table for the whole run.
///
/// Unbounded by design: the aggregation window is a single chat session,
/// so eviction would only distort the counts.
#[derive(Debug, Default)]
pub struct WordFrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`, creating the entry at count 1 the
    /// first time the token is seen.
    pub fn record(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    pub fn count(&self, token: &str) -> u64 {
        self.index
            .get(token)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// All (token, count) pairs in first-seen order.
    pub fn snapshot(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
