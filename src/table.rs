//! Pipe-table extraction.
//!
//! Runs of lines that start and end with `|` are pulled out of the text and
//! replaced by a single placeholder line, so the block parser can stay
//! line-oriented.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::TableData;

const PLACEHOLDER_PREFIX: &str = "TABLE_PLACEHOLDER_";

static DELIMITER_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-:\s]+$").unwrap());

/// Text with tables replaced by placeholder lines, plus the tables in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedTables {
    pub text: String,
    pub tables: Vec<TableData>,
}

/// Placeholder line standing in for the table at `index`.
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}")
}

/// Table index referenced by a placeholder line, if `line` is one.
pub fn placeholder_index(line: &str) -> Option<usize> {
    let digits = line.strip_prefix(PLACEHOLDER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Replace every run of two or more table rows with a placeholder line.
/// Shorter runs are written back unchanged (trimmed).
pub fn extract_tables(text: &str) -> ExtractedTables {
    let mut out = ExtractedTables::default();
    let mut lines: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_table_row(line) {
            run.push(line.trim());
            continue;
        }
        flush_run(&mut run, &mut lines, &mut out.tables);
        lines.push(line.to_string());
    }
    flush_run(&mut run, &mut lines, &mut out.tables);

    log::debug!("extracted {} table(s)", out.tables.len());
    out.text = lines.join("\n");
    out
}

fn flush_run(run: &mut Vec<&str>, lines: &mut Vec<String>, tables: &mut Vec<TableData>) {
    match run.len() {
        0 => {}
        1 => lines.extend(run.drain(..).map(str::to_string)),
        _ => {
            tables.push(parse_table(run));
            lines.push(placeholder(tables.len() - 1));
            run.clear();
        }
    }
}

/// Parse table rows. The row just above the first delimiter row (if that
/// delimiter row is not the very first row) becomes the header.
pub fn parse_table(rows: &[&str]) -> TableData {
    let rows: Vec<Vec<String>> = rows.iter().map(|row| split_cells(row)).collect();

    let header_index = rows
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, cells)| is_delimiter_row(cells))
        .map(|(i, _)| i - 1);

    match header_index {
        Some(h) => TableData {
            has_header: true,
            headers: rows[h].clone(),
            rows: rows
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i != h && *i != h + 1)
                .map(|(_, cells)| cells)
                .collect(),
        },
        None => TableData {
            has_header: false,
            headers: Vec::new(),
            rows,
        },
    }
}

fn split_cells(row: &str) -> Vec<String> {
    let mut cells: Vec<&str> = row.split('|').collect();
    if cells.first() == Some(&"") {
        cells.remove(0);
    }
    if cells.last() == Some(&"") {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

fn is_delimiter_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| DELIMITER_CELL.is_match(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_delimiter_body() {
        let table = parse_table(&["| A | B |", "| - | - |", "| 1 | 2 |"]);
        assert_eq!(
            table,
            TableData {
                has_header: true,
                headers: vec!["A".into(), "B".into()],
                rows: vec![vec!["1".into(), "2".into()]],
            }
        );
    }

    #[test]
    fn aligned_delimiters() {
        let table = parse_table(&["| L | R |", "|:---|---:|", "| a | b |", "| c | d |"]);
        assert!(table.has_header);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn no_delimiter_means_no_header() {
        let table = parse_table(&["| a | b |", "| c | d |"]);
        assert!(!table.has_header);
        assert!(table.headers.is_empty());
        assert_eq!(table.rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn leading_delimiter_row_is_data() {
        let table = parse_table(&["| --- |", "| x |"]);
        assert!(!table.has_header);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn only_first_delimiter_row_counts() {
        let table = parse_table(&["| h |", "| - |", "| a |", "| - |"]);
        assert_eq!(table.headers, vec!["h"]);
        assert_eq!(table.rows, vec![vec!["a"], vec!["-"]]);
    }

    #[test]
    fn inner_empty_cells_are_kept() {
        let table = parse_table(&["| a || c |", "| d | e | f |"]);
        assert_eq!(table.rows[0], vec!["a", "", "c"]);
    }

    #[test]
    fn extraction_replaces_block() {
        let extracted = extract_tables("intro\n| A | B |\n|---|---|\n| 1 | 2 |\noutro");
        assert_eq!(extracted.text, "intro\nTABLE_PLACEHOLDER_0\noutro");
        assert_eq!(extracted.tables.len(), 1);
    }

    #[test]
    fn single_row_is_not_a_table() {
        let extracted = extract_tables("  | just one row |  \nafter");
        assert_eq!(extracted.text, "| just one row |\nafter");
        assert!(extracted.tables.is_empty());
    }

    #[test]
    fn table_at_end_of_input() {
        let extracted = extract_tables("| a |\n| b |\n\n| c |\n| d |");
        assert_eq!(
            extracted.text,
            "TABLE_PLACEHOLDER_0\n\nTABLE_PLACEHOLDER_1"
        );
        assert_eq!(extracted.tables.len(), 2);
    }

    #[test]
    fn placeholder_parsing() {
        assert_eq!(placeholder_index(&placeholder(12)), Some(12));
        assert_eq!(placeholder_index("TABLE_PLACEHOLDER_"), None);
        assert_eq!(placeholder_index("TABLE_PLACEHOLDER_1x"), None);
    }
}
