// Terminal display for the end-of-run rankings.

use colored::Colorize;

use crate::analysis::scoring::{WordEntry, YapEntry};
use crate::output::{render_table, WordRow, YapRow};

/// How many words of the ranking to show on the terminal — the full list
/// is in the CSV; a long session easily has tens of thousands of words.
const TERMINAL_WORD_LIMIT: usize = 25;

/// Display the final yap leaderboard.
pub fn display_yap_ranking(ranking: &[YapEntry]) {
    if ranking.is_empty() {
        println!("No chatters counted this session.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Yap Report ({} chatters) ===", ranking.len()).bold()
    );
    println!("{}", render_table(ranking.iter().map(YapRow::from)));

    let above_average = ranking.iter().filter(|e| e.yap_cost > 1.0).count();
    println!(
        "  {} of {} chatters above average verbosity",
        above_average,
        ranking.len()
    );
}

/// Display the top of the word ranking.
pub fn display_word_ranking(ranking: &[WordEntry]) {
    if ranking.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("=== Word Report ({} distinct words) ===", ranking.len()).bold()
    );
    println!(
        "{}",
        render_table(ranking.iter().take(TERMINAL_WORD_LIMIT).map(WordRow::from))
    );

    if ranking.len() > TERMINAL_WORD_LIMIT {
        println!(
            "{}",
            format!(
                "  ({} more in the CSV log)",
                ranking.len() - TERMINAL_WORD_LIMIT
            )
            .dimmed()
        );
    }
}
