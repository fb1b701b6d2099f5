//! HTML rendering of the block sequence.
//!
//! Element and class names follow what the browser formatter styles:
//! `markdown-h2`, `markdown-table`, `inline-code` and so on.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, List, Span, TableData};
use crate::classify::ContentClass;
use crate::config::HtmlConfig;
use crate::inline::tokenize;

/// Render blocks to an HTML fragment. `class` adds a container class.
pub fn blocks_to_html(blocks: &[Block], class: ContentClass, config: &HtmlConfig) -> String {
    let mut out = String::new();

    if config.wrap_container {
        out.push_str("<div class=\"formatted-text");
        if class != ContentClass::Plain {
            out.push(' ');
            out.push_str(class.class_name());
        }
        out.push_str("\">\n");
    }

    for block in blocks {
        emit_block(block, &mut out);
    }

    if config.wrap_container {
        out.push_str("</div>\n");
    }
    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level} class=\"markdown-h{level}\">"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
        Block::LineBreak => out.push_str("<br>\n"),
        Block::Rule => out.push_str("<hr class=\"markdown-hr\">\n"),
        Block::List(list) => list_to_html(list, out),
        Block::Blockquote { lines } => {
            out.push_str("<blockquote class=\"markdown-blockquote\">\n");
            for line in lines {
                out.push_str("<p>");
                spans_to_html(line, out);
                out.push_str("</p>\n");
            }
            out.push_str("</blockquote>\n");
        }
        Block::Table(table) => table_to_html(table, out),
        Block::CodeBlock { language, content } => {
            match language {
                Some(lang) => {
                    out.push_str(&format!(
                        "<pre class=\"code-block language-{}\"><div class=\"code-language\">{}</div>",
                        encode_double_quoted_attribute(lang),
                        encode_text(lang)
                    ));
                }
                None => out.push_str("<pre class=\"code-block\">"),
            }
            out.push_str("<code>");
            out.push_str(&encode_text(content));
            out.push_str("</code></pre>\n");
        }
    }
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.is_ordered() { "ol" } else { "ul" };
    out.push_str(&format!("<{tag} class=\"markdown-{tag}\">\n"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(item, out);
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn table_to_html(table: &TableData, out: &mut String) {
    out.push_str("<table class=\"markdown-table\">\n");

    if table.has_header && !table.headers.is_empty() {
        out.push_str("<thead><tr>");
        for header in &table.headers {
            out.push_str("<th class=\"markdown-th\">");
            out.push_str(&encode_text(header));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>\n");
    }

    out.push_str("<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td class=\"markdown-td\">");
            spans_to_html(&tokenize(cell), out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        let (open, close) = match span {
            Span::Text(_) => ("", ""),
            Span::Code(_) => ("<code class=\"inline-code\">", "</code>"),
            Span::Bold(_) => ("<strong>", "</strong>"),
            Span::Italic(_) => ("<em>", "</em>"),
            Span::Superscript(_) => ("<sup>", "</sup>"),
        };
        out.push_str(open);
        out.push_str(&encode_text(span.text()));
        out.push_str(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        let config = HtmlConfig {
            wrap_container: false,
        };
        blocks_to_html(&parse(markdown), ContentClass::Plain, &config)
    }

    #[test]
    fn heading_and_paragraph() {
        assert_eq!(
            render("## Title\nSome *text*"),
            "<h2 class=\"markdown-h2\">Title</h2>\n<p>Some <em>text</em></p>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            render("a < b & `<c>`"),
            "<p>a &lt; b &amp; <code class=\"inline-code\">&lt;c&gt;</code></p>\n"
        );
    }

    #[test]
    fn superscript_tag_round_trips() {
        assert_eq!(render("E = mc^2"), "<p>E = mc<sup>2</sup></p>\n");
    }

    #[test]
    fn lists() {
        assert_eq!(
            render("1. a\n2. **b**"),
            "<ol class=\"markdown-ol\">\n<li>a</li>\n<li><strong>b</strong></li>\n</ol>\n"
        );
    }

    #[test]
    fn blockquote_lines_are_paragraphs() {
        assert_eq!(
            render("> a\n> b"),
            "<blockquote class=\"markdown-blockquote\">\n<p>a</p>\n<p>b</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn table_with_header() {
        assert_eq!(
            render("| *A* | B |\n|---|---|\n| *1* | 2 |"),
            "<table class=\"markdown-table\">\n\
             <thead><tr><th class=\"markdown-th\">*A*</th><th class=\"markdown-th\">B</th></tr></thead>\n\
             <tbody>\n\
             <tr><td class=\"markdown-td\"><em>1</em></td><td class=\"markdown-td\">2</td></tr>\n\
             </tbody>\n</table>\n"
        );
    }

    #[test]
    fn table_without_header_has_no_thead() {
        let html = render("| a |\n| b |");
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<tr><td class=\"markdown-td\">a</td></tr>\n<tr><td class=\"markdown-td\">b</td></tr>"));
    }

    #[test]
    fn code_block_language() {
        assert_eq!(
            render("```js\nif (a < b) {}\n```"),
            "<pre class=\"code-block language-js\"><div class=\"code-language\">js</div><code>if (a &lt; b) {}\n</code></pre>\n"
        );
    }

    #[test]
    fn rule_and_break() {
        assert_eq!(render("a\n\nb\n---"), "<p>a</p>\n<br>\n<p>b</p>\n<hr class=\"markdown-hr\">\n");
    }

    #[test]
    fn container_carries_classification() {
        let blocks = parse("# T");
        let html = blocks_to_html(&blocks, ContentClass::Headings, &HtmlConfig::default());
        assert!(html.starts_with("<div class=\"formatted-text contains-headings\">\n"));
        assert!(html.ends_with("</div>\n"));
    }
}
