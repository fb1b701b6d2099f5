use crate::block::{Block, List, Span, TableData};
use crate::config::TypstConfig;
use crate::inline::tokenize;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &TypstConfig) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.keep_heading_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_block(block: &Block, config: &TypstConfig, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::CodeBlock { language, content } => {
            // Keep code blocks together when possible
            out.push_str("#block(breakable: false)[\n```");
            if let Some(lang) = language {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n]\n\n");
        }
        Block::List(list) => {
            if list.items.len() <= config.unbreakable_list_max_items {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
        Block::Blockquote { lines } => {
            out.push_str("#quote(block: true)[\n");
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    out.push_str(" \\\n");
                }
                spans_to_typst(line, out);
            }
            out.push_str("\n]\n\n");
        }
        Block::Table(table) => {
            out.push_str("#block(breakable: false)[\n");
            table_to_typst(table, out);
            out.push_str("]\n\n");
        }
        Block::Rule => {
            out.push_str("#line(length: 100%)\n\n");
        }
        Block::LineBreak => {
            out.push_str("#v(0.5em)\n\n");
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for (i, span) in spans.iter().enumerate() {
        match span {
            Span::Text(text) if i == 0 => escape_line_start(text, out),
            _ => span_to_typst(span, out),
        }
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape(text, out),
        Span::Bold(text) => {
            out.push('*');
            escape(text, out);
            out.push('*');
        }
        Span::Italic(text) => {
            out.push('_');
            escape(text, out);
            out.push('_');
        }
        Span::Superscript(text) => {
            out.push_str("#super[");
            escape(text, out);
            out.push(']');
        }
        Span::Code(text) => {
            out.push('`');
            // Inside raw/code, backticks need special handling
            out.push_str(&text.replace('`', "\\`"));
            out.push('`');
        }
    }
}

/// Escape special Typst characters
fn escape(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '^' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Escape text that opens a line. There Typst reads `=`, `+`, `-` and `1.`
/// as heading and list markers.
fn escape_line_start(text: &str, out: &mut String) {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let enum_marker = digits > 0
        && text[digits..]
            .strip_prefix('.')
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));

    if text.starts_with(['=', '+', '-']) {
        out.push('\\');
        escape(text, out);
    } else if enum_marker {
        out.push_str(&text[..digits]);
        out.push('\\');
        escape(&text[digits..], out);
    } else {
        escape(text, out);
    }
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.is_ordered() { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        spans_to_typst(item, out);
        out.push('\n');
    }
}

fn table_to_typst(table: &TableData, out: &mut String) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Header cells (bold, plain text)
    if table.has_header {
        for cell in padded(&table.headers, col_count) {
            out.push_str("  [*");
            escape(cell, out);
            out.push_str("*],\n");
        }
    }

    for row in &table.rows {
        for cell in padded(row, col_count) {
            out.push_str("  [");
            spans_to_typst(&tokenize(cell), out);
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}

/// Typst tables fill cells row-major, so short rows are padded to keep columns aligned.
fn padded(cells: &[String], width: usize) -> impl Iterator<Item = &str> {
    cells
        .iter()
        .map(String::as_str)
        .chain(std::iter::repeat(""))
        .take(width.max(cells.len()))
}
