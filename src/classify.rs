use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+\s").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*.*\*\*").unwrap());
static TABLE_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|[\s\-:]*\|").unwrap());

/// Coarse description of what a piece of markdown contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentClass {
    Code,
    Headings,
    Emphasis,
    Table,
    Plain,
}

impl ContentClass {
    /// Container class name used by the HTML renderer; empty for plain text.
    pub fn class_name(self) -> &'static str {
        match self {
            ContentClass::Code => "contains-code",
            ContentClass::Headings => "contains-headings",
            ContentClass::Emphasis => "contains-emphasis",
            ContentClass::Table => "contains-table",
            ContentClass::Plain => "",
        }
    }
}

/// First match wins: code fences, then headings, emphasis, tables.
pub fn classify(markdown: &str) -> ContentClass {
    if markdown.contains("```") {
        ContentClass::Code
    } else if HEADING_LINE.is_match(markdown) {
        ContentClass::Headings
    } else if EMPHASIS.is_match(markdown) {
        ContentClass::Emphasis
    } else if markdown.contains('|') && TABLE_CELL.is_match(markdown) {
        ContentClass::Table
    } else {
        ContentClass::Plain
    }
}
