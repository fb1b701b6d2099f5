//! Inline span tokenizer.
//!
//! A line is refined in four passes: code, bold, italic, superscript. Each
//! pass only looks inside the `Span::Text` pieces left by the passes before
//! it, so markers inside inline code are never reinterpreted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::Span;

static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static SUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sup>([^<]+)</sup>").unwrap());
static CARET_EXPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w|\))\^(\w+)").unwrap());
static CARET_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^([^\^]+)\^").unwrap());

/// Tokenize a single line into an ordered sequence of spans.
///
/// Unmatched delimiters stay in the text. A line without any markup comes
/// back as a single `Span::Text`, even when it is empty.
pub fn tokenize(line: &str) -> Vec<Span> {
    let spans = split_text(&CODE, line, Span::Code);
    let spans = refine(spans, |text| split_text(&BOLD, text, Span::Bold));
    let spans = refine(spans, |text| split_text(&ITALIC, text, Span::Italic));
    refine(spans, superscripts)
}

/// Apply `pass` to every plain-text span, passing typed spans through.
fn refine(spans: Vec<Span>, pass: impl Fn(&str) -> Vec<Span>) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Span::Text(text) => out.extend(pass(&text)),
            typed => out.push(typed),
        }
    }
    out
}

/// Split `text` around every match of `re`, wrapping capture group 1 with
/// `make`. Literal text between matches is kept in order.
fn split_text(re: &Regex, text: &str, make: fn(String) -> Span) -> Vec<Span> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Span::Text(text[last..whole.start()].to_string()));
        }
        out.push(make(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < text.len() {
        out.push(Span::Text(text[last..].to_string()));
    }
    if out.is_empty() {
        out.push(Span::Text(text.to_string()));
    }
    out
}

/// `<sup>x</sup>`, `n^2` / `)^2` and `^x^` all become `Span::Superscript`.
fn superscripts(text: &str) -> Vec<Span> {
    let rewritten = rewrite_caret_exponents(text);
    let spans = split_text(&SUP_TAG, &rewritten, Span::Superscript);
    refine(spans, |part| split_text(&CARET_PAIR, part, Span::Superscript))
}

/// Rewrite `base^exp` to `base<sup>exp</sup>`. An exponent directly followed
/// by another caret belongs to the `^x^` form and is left alone.
fn rewrite_caret_exponents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in CARET_EXPONENT.captures_iter(text) {
        let (Some(whole), Some(base), Some(exp)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if text[whole.end()..].starts_with('^') {
            continue;
        }
        out.push_str(&text[last..whole.start()]);
        out.push_str(base.as_str());
        out.push_str("<sup>");
        out.push_str(exp.as_str());
        out.push_str("</sup>");
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_line_is_one_text_span() {
        assert_eq!(tokenize("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn empty_line_is_kept() {
        assert_eq!(tokenize(""), vec![text("")]);
    }

    #[test]
    fn mixed_spans_in_order() {
        assert_eq!(
            tokenize("Use `x` and **bold** and *em*"),
            vec![
                text("Use "),
                Span::Code("x".into()),
                text(" and "),
                Span::Bold("bold".into()),
                text(" and "),
                Span::Italic("em".into()),
            ]
        );
    }

    #[test]
    fn markers_inside_code_are_literal() {
        assert_eq!(
            tokenize("`**not bold**` *yes*"),
            vec![
                Span::Code("**not bold**".into()),
                text(" "),
                Span::Italic("yes".into()),
            ]
        );
    }

    #[test]
    fn stray_markers_stay_text() {
        assert_eq!(tokenize("a ** b"), vec![text("a ** b")]);
        assert_eq!(tokenize("open `tick"), vec![text("open `tick")]);
    }

    #[test]
    fn triple_star_leaves_outer_stars() {
        assert_eq!(
            tokenize("***both***"),
            vec![text("*"), Span::Bold("both".into()), text("*")]
        );
    }

    #[test]
    fn superscript_forms_agree() {
        let expected = vec![text("O(n"), Span::Superscript("2".into()), text(")")];
        assert_eq!(tokenize("O(n^2)"), expected);
        assert_eq!(tokenize("O(n<sup>2</sup>)"), expected);
        assert_eq!(tokenize("O(n^2^)"), expected);
    }

    #[test]
    fn caret_after_paren() {
        assert_eq!(
            tokenize("(a+b)^2"),
            vec![text("(a+b)"), Span::Superscript("2".into())]
        );
    }

    #[test]
    fn several_exponents() {
        assert_eq!(
            tokenize("x^2 + y^2"),
            vec![
                text("x"),
                Span::Superscript("2".into()),
                text(" + y"),
                Span::Superscript("2".into()),
            ]
        );
    }

    #[test]
    fn caret_exponent_inside_bold_is_untouched() {
        assert_eq!(tokenize("**n^2**"), vec![Span::Bold("n^2".into())]);
    }
}
