//! `seteuk history`: Browse and edit past results.

use chrono::{Local, TimeZone};
use clap::Subcommand;
use seteuk_core::TextMetrics;
use seteuk_engine::{HistoryStore, HistoryUpdate, RecordCategory};
use std::path::PathBuf;

use crate::files;
use crate::runtime::Runtime;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved results, newest first
    List {
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },

    /// Print one saved result
    Show {
        id: String,
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },

    /// Replace the text of a saved result
    Edit {
        id: String,
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a saved result
    Remove {
        id: String,
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },

    /// Delete every saved result of a category
    Clear {
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },
}

fn open(category: RecordCategory) -> Result<HistoryStore, Box<dyn std::error::Error>> {
    let runtime = Runtime::load()?;
    Ok(HistoryStore::open(runtime.storage, category.history_key()))
}

fn format_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HistoryAction::List { category } => {
            let history = open(category)?;
            println!("🗂  {category} history ({} items)", history.len());
            for item in history.items() {
                println!(
                    "  {}  {}  {}",
                    item.id,
                    format_time(item.timestamp),
                    item.summary.as_deref().unwrap_or("-")
                );
                println!("      {}", preview(&item.result.grade_version, 60));
            }
        }
        HistoryAction::Show { id, category } => {
            let history = open(category)?;
            let item = history
                .get(&id)
                .ok_or_else(|| format!("No history item {id} in {category}"))?;
            let metrics = TextMetrics::measure(&item.result.grade_version);
            println!("{}\n", item.result.grade_version);
            println!(
                "  {} · {} chars · {} bytes",
                format_time(item.timestamp),
                metrics.chars_with_spaces,
                metrics.bytes
            );
        }
        HistoryAction::Edit {
            id,
            category,
            text,
            file,
        } => {
            let text = files::read_text(text, file.as_deref())?;
            let mut history = open(category)?;
            let mut result = history
                .get(&id)
                .map(|item| item.result.clone())
                .ok_or_else(|| format!("No history item {id} in {category}"))?;
            result.grade_version = text;
            history.update(&id, HistoryUpdate::result(result));
            println!("✅ Updated {id}");
        }
        HistoryAction::Remove { id, category } => {
            let mut history = open(category)?;
            if history.remove(&id) {
                println!("✅ Removed {id}");
            } else {
                println!("  No history item {id} in {category}");
            }
        }
        HistoryAction::Clear { category } => {
            let mut history = open(category)?;
            let count = history.len();
            history.clear();
            println!("✅ Cleared {count} items from {category} history");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_characters() {
        assert_eq!(preview("가나다라", 2), "가나…");
        assert_eq!(preview("가나", 2), "가나");
    }
}
