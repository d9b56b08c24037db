// Message normalization — raw chat text to countable tokens.
//
// A token survives normalization if it is not syntactically a URL.
// Links dominate raids and bot spam and say nothing about how much a
// chatter actually yaps, so they never reach the counters.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Matches tokens that carry an explicit scheme (`https://...`,
/// `ftp://host.tld/...`). Bare hosts without a scheme are deliberately
/// kept — "example.com" could just as well be shorthand in a sentence,
/// and emoticons like "o.o" must never be dropped.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9+.-]*://\S+\.\S+").expect("URL pattern is a valid regex")
});

/// Whether a normalized (already lower-cased) token is syntactically a URL.
///
/// This is a pure pattern check: malformed or bizarre tokens are simply
/// "not a URL" and stay countable. It never fails.
pub fn is_url(token: &str) -> bool {
    URL_PATTERN.is_match(token)
}

/// Normalize a raw chat message into its countable tokens.
///
/// Trims, lower-cases, splits on whitespace runs, and drops URL tokens.
/// The relative order of surviving tokens is preserved — the word table
/// uses first-seen order to break ranking ties, so order matters here.
///
/// A message that is empty, whitespace-only, or all URLs normalizes to an
/// empty vector; callers treat that as "nothing to record".
pub fn normalize_message(raw: &str) -> Vec<String> {
    let lowered = raw.trim().to_lowercase();
    lowered
        .split_whitespace()
        .filter(|token| !is_url(token))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        let tokens = normalize_message("  Hello   WORLD ");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_urls_are_dropped() {
        let tokens = normalize_message("check https://example.com/clip out");
        assert_eq!(tokens, vec!["check", "out"]);
    }

    #[test]
    fn test_all_urls_yield_empty() {
        assert!(normalize_message("http://example.com https://twitch.tv/xyz").is_empty());
    }

    #[test]
    fn test_whitespace_only_yields_empty() {
        assert!(normalize_message("   ").is_empty());
        assert!(normalize_message("").is_empty());
    }

    #[test]
    fn test_bare_hosts_and_emoticons_survive() {
        // No scheme means not a URL for counting purposes
        assert!(!is_url("example.com"));
        assert!(!is_url("o.o"));
        assert!(!is_url("u.u"));
    }

    #[test]
    fn test_malformed_scheme_tokens_are_kept() {
        // "http://" with no host fails the pattern and stays countable
        let tokens = normalize_message("http:// ://nope still:here");
        assert_eq!(tokens, vec!["http://", "://nope", "still:here"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let tokens = normalize_message("c https://a.b a b");
        assert_eq!(tokens, vec!["c", "a", "b"]);
    }
}
