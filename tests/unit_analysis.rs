// Integration tests for the aggregation and scoring core.
//
// Exercises the whole path a chat message takes: normalization,
// exclusion filtering, accumulator updates, word counting, and the
// end-of-run rankings.

use std::collections::HashSet;

use yapmeter::analysis::aggregator::Aggregator;
use yapmeter::analysis::scoring::{compute_word_ranking, compute_yap_ranking, YapWeights};
use yapmeter::config::RunConfig;

fn run_config(excluded: &[&str]) -> RunConfig {
    RunConfig {
        channel: "testchannel".to_string(),
        excluded_users: excluded.iter().map(|u| u.to_lowercase()).collect::<HashSet<_>>(),
        logging: false,
    }
}

// ============================================================
// End-to-end counting scenario
// ============================================================

#[test]
fn alice_two_messages_full_scenario() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("alice", "hello world");
    agg.handle_message("alice", "hello there friend");

    let session = agg.session();
    let alice = session.users.get("alice").expect("alice exists");

    // "hello"+"world" = 10, "hello"+"there"+"friend" = 15
    assert_eq!(alice.letter_count, 25);
    assert_eq!(alice.messages, 2);
    assert_eq!(alice.word_count, 5);
    let expected_vocab: HashSet<String> = ["hello", "world", "there", "friend"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(alice.unique_words, expected_vocab);

    assert_eq!(session.words.count("hello"), 2);
    assert_eq!(session.words.count("world"), 1);
    assert_eq!(session.words.count("there"), 1);
    assert_eq!(session.words.count("friend"), 1);
}

#[test]
fn sender_names_are_case_normalized() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("Alice", "one message");
    agg.handle_message("ALICE", "another message");

    let session = agg.session();
    assert_eq!(session.users.len(), 1);
    assert_eq!(session.users.get("alice").map(|u| u.messages), Some(2));
}

// ============================================================
// Exclusion filtering
// ============================================================

#[test]
fn excluded_user_changes_nothing() {
    let mut agg = Aggregator::new(run_config(&["nightbot"]));
    agg.handle_message("alice", "hello chat");

    let words_before = agg.session().words.len();
    let users_before = agg.session().users.len();

    agg.handle_message("nightbot", "spam spam spam");
    agg.handle_message("NightBot", "case should not matter");

    assert_eq!(agg.session().words.len(), words_before);
    assert_eq!(agg.session().users.len(), users_before);
    assert!(!agg.session().users.contains("nightbot"));
}

#[test]
fn excluded_then_included_counts_once() {
    // Exclusion config is frozen per session; toggling applies to the
    // next run. Bob's identical message counts exactly once overall.
    let mut first_run = Aggregator::new(run_config(&["bob"]));
    first_run.handle_message("bob", "hello everyone");
    assert!(!first_run.session().users.contains("bob"));

    let mut second_run = Aggregator::new(run_config(&[]));
    second_run.handle_message("bob", "hello everyone");
    let bob = second_run.session().users.get("bob").expect("bob counted");
    assert_eq!(bob.messages, 1);
}

// ============================================================
// Empty-after-filtering no-ops
// ============================================================

#[test]
fn whitespace_and_url_messages_are_no_ops() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("alice", "   ");
    agg.handle_message("alice", "http://example.com");
    agg.handle_message("alice", "https://a.example https://b.example");

    assert!(agg.session().users.is_empty());
    assert!(agg.session().words.is_empty());
}

#[test]
fn urls_inside_messages_do_not_count_letters() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("alice", "watch https://clips.twitch.tv/xyz now");

    let alice = agg.session().users.get("alice").expect("alice counted");
    assert_eq!(alice.letter_count, 8); // "watch" + "now"
    assert_eq!(alice.word_count, 2);
    assert_eq!(agg.session().words.count("watch"), 1);
    assert_eq!(agg.session().words.count("https://clips.twitch.tv/xyz"), 0);
}

// ============================================================
// Counter monotonicity
// ============================================================

#[test]
fn counters_never_decrease() {
    let mut agg = Aggregator::new(run_config(&[]));
    let messages = [
        "hello",
        "a longer message with several words",
        "http://only-a-link.example",
        "short again",
        "   ",
        "hello again chat",
    ];

    let mut last = (0u64, 0u64, 0usize);
    for text in messages {
        agg.handle_message("alice", text);
        if let Some(alice) = agg.session().users.get("alice") {
            let now = (alice.letter_count, alice.messages, alice.vocab_size());
            assert!(now.0 >= last.0, "letter_count decreased");
            assert!(now.1 >= last.1, "messages decreased");
            assert!(now.2 >= last.2, "vocabulary shrank");
            last = now;
        }
    }
}

// ============================================================
// Rankings over aggregated state
// ============================================================

#[test]
fn rankings_are_pure_and_repeatable() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("alice", "plenty of different words in this one");
    agg.handle_message("bob", "hi");

    let session = agg.into_session();
    let weights = YapWeights::default();

    let first = compute_yap_ranking(session.users.iter(), &weights);
    let second = compute_yap_ranking(session.users.iter(), &weights);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.username, b.username);
        assert!((a.yap_cost - b.yap_cost).abs() < f64::EPSILON);
    }

    let words = compute_word_ranking(session.words.snapshot());
    assert_eq!(words.len(), session.words.len());
}

#[test]
fn yap_ordering_follows_raw_factor() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("loud", "an endless stream of brand new vocabulary every message");
    agg.handle_message("loud", "and it simply never stops flowing with fresh words");
    agg.handle_message("medium", "a perfectly normal amount of chatting");
    agg.handle_message("quiet", "hi");

    let session = agg.into_session();
    let ranking = compute_yap_ranking(session.users.iter(), &YapWeights::default());

    let order: Vec<&str> = ranking.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(order, vec!["loud", "medium", "quiet"]);

    // Costs are sorted descending
    for pair in ranking.windows(2) {
        assert!(pair[0].yap_cost >= pair[1].yap_cost);
    }
}

#[test]
fn word_ranking_ties_keep_first_seen_order() {
    let mut agg = Aggregator::new(run_config(&[]));
    agg.handle_message("alice", "a b");
    agg.handle_message("alice", "a b c");
    agg.handle_message("alice", "a b");

    let session = agg.into_session();
    let ranking = compute_word_ranking(session.words.snapshot());
    let order: Vec<(&str, u64)> = ranking.iter().map(|e| (e.word.as_str(), e.count)).collect();
    assert_eq!(order, vec![("a", 3), ("b", 3), ("c", 1)]);
}
