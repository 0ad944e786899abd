//! Strict line-oriented INI parsing.

use super::document::Document;
use crate::error::{ConfigError, Result};
use std::collections::{HashMap, HashSet};

impl Document {
    /// Parse INI text into a fresh document.
    ///
    /// Recognized lines, after trimming surrounding whitespace:
    /// - blank lines and `;`/`#` comment lines, skipped
    /// - `[section]` headers (`[DEFAULT]` targets the default section)
    /// - `key = value` or `key: value` assignments, split at the earliest
    ///   delimiter; keys and values are trimmed, values may be empty
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingSectionHeader`] for an assignment before any
    ///   header
    /// - [`ConfigError::Parse`] for an unrecognizable line, an empty section
    ///   name or key, or a duplicate section/key within this text
    pub fn parse(text: &str) -> Result<Document> {
        let mut doc = Document::new();
        let mut current: Option<String> = None;
        let mut seen_sections: HashSet<String> = HashSet::new();
        let mut seen_keys: HashMap<String, HashSet<String>> = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    return Err(ConfigError::parse(lineno, "unterminated section header"));
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ConfigError::parse(lineno, "empty section name"));
                }
                if !seen_sections.insert(name.to_string()) {
                    return Err(ConfigError::parse(
                        lineno,
                        format!("duplicate section [{name}]"),
                    ));
                }
                doc.add_section(name);
                current = Some(name.to_string());
                continue;
            }

            let delim = line
                .char_indices()
                .find(|(_, c)| *c == '=' || *c == ':')
                .map(|(i, _)| i);
            let Some(delim) = delim else {
                return Err(ConfigError::parse(
                    lineno,
                    format!("expected 'key = value', got '{line}'"),
                ));
            };

            let key = line[..delim].trim();
            let value = line[delim + 1..].trim();
            if key.is_empty() {
                return Err(ConfigError::parse(lineno, "empty key"));
            }

            let Some(section) = current.as_deref() else {
                return Err(ConfigError::MissingSectionHeader { line: lineno });
            };

            let keys = seen_keys.entry(section.to_string()).or_default();
            if !keys.insert(key.to_string()) {
                return Err(ConfigError::parse(
                    lineno,
                    format!("duplicate key '{key}' in section [{section}]"),
                ));
            }

            doc.set(section, key, value);
        }

        Ok(doc)
    }
}
