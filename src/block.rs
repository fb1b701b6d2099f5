use serde::Serialize;

/// Inline text spans with formatting. Spans never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Code(String),
    Bold(String),
    Italic(String),
    Superscript(String),
}

impl Span {
    /// The text carried by the span, without any delimiter markers.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(t)
            | Span::Code(t)
            | Span::Bold(t)
            | Span::Italic(t)
            | Span::Superscript(t) => t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A flat list (ordered or unordered); each item is one line of spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<Vec<Span>>,
}

impl List {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.kind == ListKind::Ordered
    }
}

/// A pipe table. When `has_header` is set, `rows` holds neither the header
/// row nor the delimiter row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub has_header: bool,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Widest row (header included), used by renderers that need a column count.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Block-level elements, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    List(List),
    Blockquote {
        lines: Vec<Vec<Span>>,
    },
    Table(TableData),
    Rule,
    LineBreak,
}
