//! Plain-text to markdown normalization.
//!
//! Every line is rewritten on its own. Block-level rules are tried in order
//! and the first one that applies wins; a line no rule claims only gets the
//! inline substitutions (links, emails, quoted phrases).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NormalizeConfig;
use crate::table::is_table_row;

static NUMBERED_STEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[.)]\s+(.+)").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// A block-level rewrite: applies to a trimmed, non-empty line.
struct LineRule {
    name: &'static str,
    applies: fn(&NormalizeConfig, &str) -> bool,
    rewrite: fn(&str) -> String,
}

const RULES: &[LineRule] = &[
    LineRule {
        name: "emoji header",
        applies: starts_with_header_emoji,
        rewrite: |line| format!("## {line}"),
    },
    LineRule {
        name: "colon header",
        applies: is_colon_header,
        rewrite: |line| format!("### {line}"),
    },
    LineRule {
        name: "numbered step",
        applies: |_, line| NUMBERED_STEP.is_match(line),
        rewrite: |line| NUMBERED_STEP.replace(line, "${1}. ${2}").into_owned(),
    },
    LineRule {
        name: "action verb",
        applies: starts_with_action_verb,
        rewrite: |line| format!("- {line}"),
    },
    LineRule {
        name: "button word",
        applies: is_button_word,
        rewrite: |line| format!("**{line}**"),
    },
];

/// Rewrite unstructured prose into markdown with the default word tables.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &NormalizeConfig::default())
}

/// Rewrite unstructured prose into markdown.
///
/// Lines are trimmed and rejoined with a blank line between them. Adjacent
/// pipe-table rows are the exception and stay on consecutive lines.
pub fn normalize_with(text: &str, config: &NormalizeConfig) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len() * 2);
    let mut prev: Option<String> = None;

    for line in text.split('\n') {
        let rewritten = normalize_line(line.trim(), config);
        if let Some(prev) = &prev {
            if is_table_row(prev) && is_table_row(&rewritten) {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        out.push_str(&rewritten);
        prev = Some(rewritten);
    }

    log::debug!(
        "normalized to markdown: {}",
        out.chars().take(200).collect::<String>()
    );
    out
}

fn normalize_line(line: &str, config: &NormalizeConfig) -> String {
    if line.is_empty() {
        return String::new();
    }
    for rule in RULES {
        if (rule.applies)(config, line) {
            log::trace!("{}: {line}", rule.name);
            return (rule.rewrite)(line);
        }
    }
    substitute_inline(line)
}

/// Links, emails and quoted phrases. These combine freely on one line.
fn substitute_inline(line: &str) -> String {
    let mut line = URL.replace_all(line, "[${0}](${0})").into_owned();
    if line.contains('@') && line.contains('.') {
        line = EMAIL.replace_all(&line, "`${0}`").into_owned();
    }
    QUOTED.replace_all(&line, "**\"${1}\"**").into_owned()
}

fn starts_with_header_emoji(config: &NormalizeConfig, line: &str) -> bool {
    config
        .header_emojis
        .iter()
        .any(|emoji| !emoji.is_empty() && line.starts_with(emoji.as_str()))
}

fn is_colon_header(config: &NormalizeConfig, line: &str) -> bool {
    line.ends_with(':')
        && line.chars().count() < config.max_colon_header_len
        && !line.contains("http")
        && !line.contains('@')
}

fn starts_with_action_verb(config: &NormalizeConfig, line: &str) -> bool {
    let lower = line.to_lowercase();
    config
        .action_verbs
        .iter()
        .any(|verb| lower.starts_with(verb.to_lowercase().as_str()))
}

fn is_button_word(config: &NormalizeConfig, line: &str) -> bool {
    let lower = line.to_lowercase();
    config
        .button_words
        .iter()
        .any(|word| word.to_lowercase() == lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("🔐 Security notes", "## 🔐 Security notes")]
    #[case("⚠️ Careful", "## ⚠️ Careful")]
    #[case("Open a Browser:", "### Open a Browser:")]
    #[case("1) Log in", "1. Log in")]
    #[case("12.   Finish up", "12. Finish up")]
    #[case("Click the gear icon", "- Click the gear icon")]
    #[case("go to settings", "- go to settings")]
    #[case("Make sure it is on", "- Make sure it is on")]
    #[case("Submit", "**Submit**")]
    #[case("ok", "**ok**")]
    #[case("Just a sentence.", "Just a sentence.")]
    fn single_line_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn rules_are_exclusive() {
        // Emoji wins over the trailing colon, verb wins over the button word.
        assert_eq!(normalize("📝 Notes:"), "## 📝 Notes:");
        assert_eq!(normalize("Open"), "- Open");
    }

    #[test]
    fn colon_header_limits() {
        assert_eq!(normalize("See http://x.io:"), "- See http://x.io:");
        assert_eq!(normalize("Mail me@x.io:"), "Mail `me@x.io`:");
        let long = format!("{}:", "word ".repeat(12));
        assert_eq!(normalize(&long), long.trim());
    }

    // Verbs are plain prefixes, so inflected and run-on forms still match.
    #[rstest]
    #[case("Checking the logs")]
    #[case("Looking at the panel")]
    #[case("If your account is locked")]
    #[case("Entering the code")]
    #[case("Typewriters are loud")]
    fn verbs_match_as_prefix(#[case] line: &str) {
        assert_eq!(normalize(line), format!("- {line}"));
    }

    #[test]
    fn inline_substitutions_combine() {
        assert_eq!(
            normalize(r#"Write to admin@example.com via "Contact" at https://example.com/help"#),
            "Write to `admin@example.com` via **\"Contact\"** at \
             [https://example.com/help](https://example.com/help)"
        );
    }

    #[test]
    fn lines_are_trimmed_and_spaced() {
        assert_eq!(normalize("  first  \nsecond\n\nthird"), "first\n\nsecond\n\n\n\nthird");
    }

    #[test]
    fn table_rows_stay_adjacent() {
        assert_eq!(
            normalize("Intro\n| A | B |\n|---|---|\n| 1 | 2 |"),
            "Intro\n\n| A | B |\n|---|---|\n| 1 | 2 |"
        );
    }

    #[test]
    fn markdown_passes_through() {
        assert_eq!(normalize("# Title\n- item\n> quote"), "# Title\n\n- item\n\n> quote");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn custom_word_tables() {
        let config = NormalizeConfig {
            action_verbs: vec!["Tap".into()],
            ..NormalizeConfig::default()
        };
        assert_eq!(normalize_with("Tap here", &config), "- Tap here");
        assert_eq!(normalize_with("Click here", &config), "Click here");
    }
}
