use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, List, ListKind, Span, TableData};
use crate::inline::tokenize;
use crate::table::{self, extract_tables};

const FENCE: &str = "```";

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)").unwrap());
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*•-]\s+(.*)").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)").unwrap());

/// A stretch of input between code fences.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Code(&'a str),
}

/// Split text on triple-backtick fences. Odd segments are code, so an
/// unterminated fence turns the rest of the input into code.
pub fn split_fences(text: &str) -> Vec<Segment<'_>> {
    text.split(FENCE)
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 0 {
                Segment::Text(part)
            } else {
                Segment::Code(part)
            }
        })
        .collect()
}

/// A code segment's first line is its language tag when it is a single word.
pub fn code_block(segment: &str) -> Block {
    let (first, rest) = segment.split_once('\n').unwrap_or((segment, ""));
    let tag = first.trim();
    if !tag.is_empty() && !tag.contains(' ') {
        Block::CodeBlock {
            language: Some(tag.to_string()),
            content: rest.to_string(),
        }
    } else {
        Block::CodeBlock {
            language: None,
            content: segment.to_string(),
        }
    }
}

/// Parse markdown text into a list of blocks.
///
/// Code fences are split out first; the text between them goes through
/// table extraction and the line parser.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in split_fences(markdown) {
        match segment {
            Segment::Text(text) => blocks.extend(parse_text(text)),
            Segment::Code(code) => blocks.push(code_block(code)),
        }
    }
    log::debug!("parsed {} block(s)", blocks.len());
    blocks
}

/// Parse fence-free markdown: tables are extracted, then lines are parsed.
pub fn parse_text(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }
    let extracted = extract_tables(text);
    parse_lines(&extracted.text, &extracted.tables)
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    // Open list, if any
    list: Option<List>,
    // Open blockquote lines; empty when no blockquote is open
    quote: Vec<Vec<Span>>,
}

impl ParseState {
    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List(list));
        }
    }

    fn flush_quote(&mut self) {
        if !self.quote.is_empty() {
            let lines = std::mem::take(&mut self.quote);
            self.blocks.push(Block::Blockquote { lines });
        }
    }

    fn flush(&mut self) {
        self.flush_list();
        self.flush_quote();
    }

    fn push_item(&mut self, kind: ListKind, content: Vec<Span>) {
        if self.list.as_ref().is_some_and(|list| list.kind != kind) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| List::new(kind))
            .items
            .push(content);
    }
}

/// Line-by-line block parsing over table-extracted text.
///
/// `TABLE_PLACEHOLDER_<n>` lines are replaced by `tables[n]`.
pub fn parse_lines(text: &str, tables: &[TableData]) -> Vec<Block> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut state = ParseState::default();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(index) = table::placeholder_index(trimmed) {
            if let Some(table) = tables.get(index) {
                state.flush();
                state.blocks.push(Block::Table(table.clone()));
            }
            continue;
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            state.flush();
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let content = caps.get(2).map_or("", |m| m.as_str());
            state.blocks.push(Block::Heading {
                level,
                content: tokenize(content),
            });
            continue;
        }

        if matches!(trimmed, "---" | "***" | "___") {
            state.flush();
            state.blocks.push(Block::Rule);
            continue;
        }

        if let Some(quoted) = trimmed.strip_prefix("> ") {
            state.quote.push(tokenize(quoted));
            continue;
        }
        state.flush_quote();

        if let Some((kind, content)) = list_item(trimmed) {
            state.push_item(kind, tokenize(content));
            continue;
        }

        state.flush_list();
        if !trimmed.is_empty() {
            state.blocks.push(Block::Paragraph {
                content: tokenize(trimmed),
            });
        } else if is_between_text(&lines, i) {
            state.blocks.push(Block::LineBreak);
        }
    }

    state.flush();
    state.blocks
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return Some((ListKind::Unordered, caps.get(1)?.as_str()));
    }
    let caps = ORDERED_ITEM.captures(line)?;
    Some((ListKind::Ordered, caps.get(1)?.as_str()))
}

/// A blank line directly between two non-blank lines.
fn is_between_text(lines: &[&str], i: usize) -> bool {
    i > 0
        && i + 1 < lines.len()
        && !lines[i - 1].trim().is_empty()
        && !lines[i + 1].trim().is_empty()
}
