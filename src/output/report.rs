// Report files — full CSV logs plus condensed overlay tables.
//
// Per run, four artifacts land in output/<channel>/:
//   <start>-yap.csv    full user ranking, one row per chatter
//   <start>-words.csv  full word ranking, one row per word
//   yap.txt            condensed user table, overwritten every run
//   words.txt          condensed word table, overwritten every run
// The .txt files exist for stream overlays, which is also why they can
// be prefixed with blank padding lines.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::scoring::{WordEntry, YapEntry};
use crate::output::{render_table, WordRow, YapRow};

/// Root of the report tree, relative to the working directory.
pub const OUTPUT_DIR: &str = "output";

/// Write all four report files for one finished run.
/// Returns the directory the reports were written to.
pub fn write_reports(
    started_at: &str,
    channel: &str,
    yap_ranking: &[YapEntry],
    word_ranking: &[WordEntry],
    padding: usize,
) -> Result<PathBuf> {
    let dir = Path::new(OUTPUT_DIR).join(channel);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    write_csv(&dir.join(format!("{started_at}-yap.csv")), yap_ranking)?;
    write_csv(&dir.join(format!("{started_at}-words.csv")), word_ranking)?;

    let yap_table = render_table(yap_ranking.iter().map(YapRow::from));
    write_condensed(&dir.join("yap.txt"), &yap_table, padding)?;

    let word_table = render_table(word_ranking.iter().map(WordRow::from));
    write_condensed(&dir.join("words.txt"), &word_table, padding)?;

    Ok(dir)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn write_condensed(path: &Path, table: &str, padding: usize) -> Result<()> {
    let mut content = "\n".repeat(padding);
    content.push_str(table);
    content.push('\n');
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
