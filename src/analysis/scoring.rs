// Yap-cost scoring and ranking.
//
// The pipeline per user, in order: raw yap factor (super-linear in the
// counters), natural log (tames the exponential spread between lurkers
// and keyboard warriors), population z-score across the run, then a
// 2^z curve back onto a multiplicative scale. An average chatter lands
// at cost 1.0 and every standard deviation above the mean doubles it.
//
// Both rankings are pure reads of the accumulated state — calling them
// twice, early, or on an empty run is always fine.

use std::cmp::Ordering;

use serde::Serialize;

use crate::analysis::stats::UserStats;

/// Tunable constants of the yap-factor formula.
///
/// The exponents are empirically chosen: 0.75 dampens raw letter volume,
/// 1.2 boosts vocabulary relative to message count. Changing them changes
/// every historical report's scale, so they live here rather than inline.
pub struct YapWeights {
    /// Exponent applied to the cumulative letter count.
    pub letter_exponent: f64,
    /// Exponent applied to the vocabulary size before dividing by messages.
    pub vocab_exponent: f64,
    /// Base of the re-exponentiation curve applied to the z-score.
    pub curve_base: f64,
}

impl Default for YapWeights {
    fn default() -> Self {
        Self {
            letter_exponent: 0.75,
            vocab_exponent: 1.2,
            curve_base: 2.0,
        }
    }
}

/// One row of the user ranking. Serialized as-is into the full CSV log.
#[derive(Debug, Clone, Serialize)]
pub struct YapEntry {
    pub username: String,
    #[serde(rename = "yap cost")]
    pub yap_cost: f64,
    pub letters: u64,
    pub messages: u64,
    #[serde(rename = "avg. message len")]
    pub avg_message_length: f64,
    pub vocab: usize,
}

/// One row of the word ranking.
#[derive(Debug, Clone, Serialize)]
pub struct WordEntry {
    pub word: String,
    pub count: u64,
}

/// Raw yap factor: `letters^0.75 * (vocab^1.2 / messages + avg_len)`.
///
/// Monotonically increasing and super-linear in verbosity; rewards both
/// sheer volume and lexical diversity per message. Strictly positive for
/// any accumulator that exists (its first update guarantees at least one
/// letter and one message), which keeps the log transform total.
pub fn raw_yap_factor(stats: &UserStats, weights: &YapWeights) -> f64 {
    let scalar = (stats.letter_count as f64).powf(weights.letter_exponent);
    let unique_word_ratio =
        (stats.vocab_size() as f64).powf(weights.vocab_exponent) / stats.messages as f64;
    scalar * (unique_word_ratio + stats.average_message_length())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N), via Welford's algorithm
/// for numerical stability.
fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;

    for (i, &value) in values.iter().enumerate() {
        let delta = value - mean;
        mean += delta / (i + 1) as f64;
        let delta2 = value - mean;
        m2 += delta * delta2;
    }

    (m2 / values.len() as f64).sqrt()
}

/// Population z-scores for the run.
///
/// With a single user (or an all-identical population) the standard
/// deviation is zero and the textbook formula is undefined; the defined
/// fallback is z = 0 for everyone, which the curve maps to cost 1.0.
fn z_scores(values: &[f64]) -> Vec<f64> {
    let mean = mean(values);
    let std_dev = population_std_dev(values);
    if std_dev == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std_dev).collect()
}

/// Rank all users of a run by yap cost, descending.
///
/// Ties keep the order the users first appeared in — the sort is stable
/// and no secondary key is applied, so callers must not assume
/// alphabetical tie order.
pub fn compute_yap_ranking<'a, I>(users: I, weights: &YapWeights) -> Vec<YapEntry>
where
    I: IntoIterator<Item = &'a UserStats>,
{
    let users: Vec<&UserStats> = users.into_iter().collect();
    if users.is_empty() {
        return Vec::new();
    }

    let scaled_factors: Vec<f64> = users
        .iter()
        .map(|u| raw_yap_factor(u, weights).ln())
        .collect();
    let z = z_scores(&scaled_factors);

    let mut entries: Vec<YapEntry> = users
        .iter()
        .zip(z)
        .map(|(u, z)| YapEntry {
            username: u.username.clone(),
            yap_cost: weights.curve_base.powf(z),
            letters: u.letter_count,
            messages: u.messages,
            avg_message_length: u.average_message_length(),
            vocab: u.vocab_size(),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.yap_cost
            .partial_cmp(&a.yap_cost)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// Rank all words of a run by occurrence count, descending.
///
/// Stable sort over the table's snapshot: tied words keep first-seen
/// order.
pub fn compute_word_ranking(snapshot: &[(String, u64)]) -> Vec<WordEntry> {
    let mut entries: Vec<WordEntry> = snapshot
        .iter()
        .map(|(word, count)| WordEntry {
            word: word.clone(),
            count: *count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, messages: &[&str]) -> UserStats {
        let mut stats = UserStats::new(name);
        for message in messages {
            let tokens: Vec<String> = message.split_whitespace().map(ToString::to_string).collect();
            stats.update(&tokens);
        }
        stats
    }

    #[test]
    fn test_raw_factor_concrete_value() {
        // letters = 10, vocab = 2, messages = 1, avg len = 10
        // 10^0.75 * (2^1.2 / 1 + 10) = 5.6234 * 12.2974 = 69.153
        let stats = user("alice", &["hello world"]);
        let factor = raw_yap_factor(&stats, &YapWeights::default());
        assert!((factor - 69.153).abs() < 0.01, "Expected ~69.153, got {factor}");
    }

    #[test]
    fn test_single_user_costs_exactly_one() {
        let stats = user("solo", &["hello there chat"]);
        let ranking = compute_yap_ranking(vec![&stats], &YapWeights::default());
        assert_eq!(ranking.len(), 1);
        assert!((ranking[0].yap_cost - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_identical_users_all_cost_one() {
        let a = user("a", &["same words here"]);
        let b = user("b", &["same words here"]);
        let ranking = compute_yap_ranking(vec![&a, &b], &YapWeights::default());
        assert!(ranking.iter().all(|e| (e.yap_cost - 1.0).abs() < 1e-12));
        // Tie keeps first-appearance order
        assert_eq!(ranking[0].username, "a");
        assert_eq!(ranking[1].username, "b");
    }

    #[test]
    fn test_more_yap_ranks_higher() {
        let quiet = user("quiet", &["hi"]);
        let loud = user(
            "loud",
            &[
                "an absolutely relentless torrent of distinct vocabulary every single message",
                "never repeating words because variety is the whole point of yapping",
            ],
        );
        let ranking = compute_yap_ranking(vec![&quiet, &loud], &YapWeights::default());
        assert_eq!(ranking[0].username, "loud");
        assert!(ranking[0].yap_cost > ranking[1].yap_cost);
    }

    #[test]
    fn test_two_user_costs_are_reciprocal() {
        // With N=2 the z-scores are +1 and -1, so costs are 2.0 and 0.5.
        let quiet = user("quiet", &["hi"]);
        let loud = user("loud", &["so many entirely different words in here friend"]);
        let ranking = compute_yap_ranking(vec![&quiet, &loud], &YapWeights::default());
        assert!((ranking[0].yap_cost - 2.0).abs() < 1e-9);
        assert!((ranking[1].yap_cost - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_run_yields_empty_rankings() {
        let ranking = compute_yap_ranking(std::iter::empty::<&UserStats>(), &YapWeights::default());
        assert!(ranking.is_empty());
        assert!(compute_word_ranking(&[]).is_empty());
    }

    #[test]
    fn test_word_ranking_tie_keeps_insertion_order() {
        let snapshot = vec![
            ("a".to_string(), 3),
            ("b".to_string(), 3),
            ("c".to_string(), 1),
        ];
        let ranking = compute_word_ranking(&snapshot);
        let order: Vec<(&str, u64)> = ranking.iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(order, vec![("a", 3), ("b", 3), ("c", 1)]);
    }

    #[test]
    fn test_population_std_dev_matches_hand_calc() {
        // Values 2, 4, 4, 4, 5, 5, 7, 9: population std dev is exactly 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
    }
}
