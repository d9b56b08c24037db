// Report output — persisted files and terminal display.

pub mod report;
pub mod terminal;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analysis::scoring::{WordEntry, YapEntry};

/// Condensed yap row — the subset of columns that fits a stream overlay.
/// Float columns are preformatted so the table stays narrow.
#[derive(Tabled)]
pub struct YapRow {
    pub username: String,
    #[tabled(rename = "yap cost")]
    pub yap_cost: String,
    #[tabled(rename = "avg. message len")]
    pub avg_message_len: String,
    pub vocab: usize,
}

impl From<&YapEntry> for YapRow {
    fn from(entry: &YapEntry) -> Self {
        Self {
            username: entry.username.clone(),
            yap_cost: format!("{:.3}", entry.yap_cost),
            avg_message_len: format!("{:.1}", entry.avg_message_length),
            vocab: entry.vocab,
        }
    }
}

/// Condensed word row.
#[derive(Tabled)]
pub struct WordRow {
    pub word: String,
    pub count: u64,
}

impl From<&WordEntry> for WordRow {
    fn from(entry: &WordEntry) -> Self {
        Self {
            word: entry.word.clone(),
            count: entry.count,
        }
    }
}

/// Render rows as a psql-style table, the same shape in files and on the
/// terminal.
pub fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}
