use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const WORD_TABLES: [&str; 3] = ["header_emojis", "action_verbs", "button_words"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to read {DEFAULT_CONFIG}: {e}"));

    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid {DEFAULT_CONFIG}: {e}"));

    let Some(normalize) = table.get("normalize").and_then(|v| v.as_table()) else {
        panic!("{DEFAULT_CONFIG} is missing the [normalize] table");
    };
    for key in WORD_TABLES {
        let words = normalize
            .get(key)
            .and_then(|v| v.as_array())
            .unwrap_or_else(|| panic!("normalize.{key} must be an array"));
        if words.iter().any(|w| w.as_str().is_none_or(str::is_empty)) {
            panic!("normalize.{key} must only contain non-empty strings");
        }
    }
}
