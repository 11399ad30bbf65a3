/// Output formatting for standings and import results: terminal table and JSON.
use animelo_core::Item;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::import::ImportSummary;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    #[serde(flatten)]
    item: &'a Item,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    total_decisions: u64,
}

/// Left-align by terminal columns; wide CJK glyphs take two.
fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text.width())))
}

/// Render standings as a formatted terminal table. `total_decisions` covers
/// the whole store, not just the rows shown.
pub fn format_table(items: &[Item], total_decisions: u64) -> String {
    // Find the widest title for padding
    let name_width = items
        .iter()
        .map(|i| i.title.width())
        .max()
        .unwrap_or(5)
        .max(5); // at least "Title"

    let mut out = String::new();
    out.push_str(&format!("   # | {} | Rating | Comparisons\n", pad("Title", name_width)));
    out.push_str(&format!("-----|-{}-|--------|------------\n", "-".repeat(name_width)));

    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} | {} | {:>6} | {:>11}\n",
            i + 1,
            pad(&item.title, name_width),
            item.rating,
            item.comparisons,
        ));
    }

    out.push_str(&format!(
        "\n{} items shown, {} decisions recorded\n",
        items.len(),
        total_decisions,
    ));
    out
}

pub fn print_table(items: &[Item], total_decisions: u64) {
    print!("{}", format_table(items, total_decisions));
}

/// Print standings as JSON.
pub fn print_json(items: &[Item], total_decisions: u64) {
    let output = JsonOutput {
        items: items
            .iter()
            .enumerate()
            .map(|(i, item)| JsonRankedItem { rank: i + 1, item })
            .collect(),
        total_decisions,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize standings: {e}")),
    }
}

pub fn print_import_summary(summary: &ImportSummary) {
    println!(
        "Imported {} of {} titles ({} eligible for rating)",
        summary.inserted, summary.parsed, summary.eligible,
    );
    if summary.duplicates > 0 {
        println!("Skipped {} titles already in the database", summary.duplicates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str, rating: i64, comparisons: u32) -> Item {
        Item {
            id,
            title: title.to_string(),
            status: "Completed".to_string(),
            eligible: true,
            rating,
            comparisons,
        }
    }

    #[test]
    fn test_table_layout() {
        let items = vec![item(1, "Cowboy Bebop", 1525, 1), item(6, "Trigun", 1475, 1)];
        let table = format_table(&items, 1);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "   # | Title        | Rating | Comparisons");
        assert_eq!(lines[2], "   1 | Cowboy Bebop |   1525 |           1");
        assert_eq!(lines[3], "   2 | Trigun       |   1475 |           1");
        assert!(table.contains("2 items shown, 1 decisions recorded"));
    }

    #[test]
    fn test_table_subset_reports_store_total() {
        let items = vec![item(1, "Cowboy Bebop", 1575, 3)];
        let table = format_table(&items, 5);
        assert!(table.contains("1 items shown, 5 decisions recorded"));
    }

    #[test]
    fn test_table_aligns_wide_titles() {
        let items = vec![item(16498, "進撃の巨人", 1530, 2), item(6, "Trigun", 1470, 2)];
        let table = format_table(&items, 2);
        let lines: Vec<&str> = table.lines().take(4).collect();
        assert_eq!(lines[2], "   1 | 進撃の巨人 |   1530 |           2");
        assert_eq!(lines[3], "   2 | Trigun     |   1470 |           2");
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_table_empty() {
        let table = format_table(&[], 0);
        assert!(table.starts_with("   # | Title | Rating"));
        assert!(table.contains("0 items shown"));
    }
}
