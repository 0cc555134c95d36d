use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

// One `"key": "value"` theme entry. The scan is positional, not a JSON
// tokenizer: key is whatever sits between the first two quotes, value is
// whatever sits between the first two quotes after the first colon that
// follows the key. Known limitation: a quote inside a value truncates the
// value at that quote.
static ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^"]*"([^"]*)"[^:]*:[^"]*"([^"]*)""#).unwrap());

/// Per-field color and icon overrides read from the theme file.
///
/// Keys follow the shape `{field}_color` / `{field}_icon` for the fields
/// os, cpu, ram, shell, wm and gpu. Anything else in the file is ignored.
#[derive(Debug, Default)]
pub struct Theme {
    entries: HashMap<String, String>,
}

impl Theme {
    /// Reads the theme file at `path`. A missing or unreadable file is the
    /// valid "no theme" state, not an error.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) => {
                log::debug!("no theme at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Line-oriented parse. Lines that don't match the entry shape are
    /// skipped silently; a repeated key keeps its last value.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            if let Some(caps) = ENTRY.captures(line) {
                entries.insert(caps[1].to_string(), caps[2].to_string());
            }
        }
        Theme { entries }
    }

    /// Color spec for a field, or `""` when the theme doesn't set one.
    pub fn color(&self, field: &str) -> &str {
        self.entry(field, "color").unwrap_or("")
    }

    /// Icon text for a field. `None` means "use the default label"; an
    /// explicitly empty icon stays empty.
    pub fn icon(&self, field: &str) -> Option<&str> {
        self.entry(field, "icon")
    }

    fn entry(&self, field: &str, kind: &str) -> Option<&str> {
        self.entries
            .get(&format!("{}_{}", field, kind))
            .map(String::as_str)
    }
}
