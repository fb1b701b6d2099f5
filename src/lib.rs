mod block;
mod classify;
mod config;
mod error;
mod html;
mod inline;
mod normalize;
mod parser;
mod table;
mod typst;

pub use block::{Block, List, ListKind, Span, TableData};
pub use classify::{ContentClass, classify};
pub use config::{Config, HtmlConfig, NormalizeConfig, TypstConfig};
pub use error::{Error, Result};
pub use html::blocks_to_html;
pub use inline::tokenize;
pub use normalize::{normalize, normalize_with};
pub use parser::parse;
pub use table::{ExtractedTables, extract_tables};
pub use typst::blocks_to_typst;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

use parser::Segment;

/// Convert plain text (or markdown) into blocks using the default config.
pub fn convert(text: &str) -> Vec<Block> {
    convert_with_config(text, &Config::compiled_default())
}

/// Convert plain text (or markdown) into blocks.
///
/// Code fences are cut out first and kept verbatim. Everything else is
/// normalized (unless disabled), table-extracted and parsed line by line.
pub fn convert_with_config(text: &str, config: &Config) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in parser::split_fences(text) {
        match segment {
            Segment::Text(text) if config.normalize.enabled => {
                let markdown = normalize_with(text, &config.normalize);
                blocks.extend(parser::parse_text(&markdown));
            }
            Segment::Text(text) => blocks.extend(parser::parse_text(text)),
            Segment::Code(code) => blocks.push(parser::code_block(code)),
        }
    }
    log::debug!("converted {} bytes into {} block(s)", text.len(), blocks.len());
    blocks
}

/// Convert text to an HTML fragment using default config.
pub fn text_to_html(text: &str) -> String {
    text_to_html_with_config(text, &Config::compiled_default())
}

/// Convert text to an HTML fragment with custom config.
pub fn text_to_html_with_config(text: &str, config: &Config) -> String {
    let blocks = convert_with_config(text, config);
    html::blocks_to_html(&blocks, classify(text), &config.html)
}

/// Convert text to Typst markup using default config.
pub fn text_to_typst(text: &str) -> String {
    text_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert text to Typst markup with custom config.
pub fn text_to_typst_with_config(text: &str, config: &Config) -> String {
    let blocks = convert_with_config(text, config);
    typst::blocks_to_typst(&blocks, &config.typst)
}

/// Convert text to PDF bytes using default config.
pub fn text_to_pdf(text: &str) -> Result<Vec<u8>> {
    text_to_pdf_with_config(text, &Config::compiled_default())
}

/// Convert text to PDF bytes with custom config.
pub fn text_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = text_to_typst_with_config(text, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::TypstCompile(format!("{e:?}")))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::PdfGeneration(format!("{e:?}")))
}
