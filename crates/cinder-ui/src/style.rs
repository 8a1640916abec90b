//! Style sheets: per-type default property tables.
//!
//! The format is a flat list of blocks:
//!
//! ```text
//! // comment
//! Button {
//!     background-color: #3355AA;
//!     text-color: #FFFFFF;
//! }
//! ```
//!
//! A sheet is a lookup table consulted by callers; nothing is auto-applied
//! to live widgets. Values stay raw strings so the same table can feed the
//! markup property setters.

use std::collections::HashMap;

use cinder_ui_core::logging::targets;
use tracing::warn;

/// Parsed style rules: type name to property name to raw value.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: HashMap<String, HashMap<String, String>>,
}

impl StyleSheet {
    /// Empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a sheet from text. Malformed lines are skipped with a warning;
    /// parsing never fails.
    pub fn parse(source: &str) -> Self {
        let mut sheet = Self::new();
        let mut current: Option<String> = None;

        for (number, raw) in source.lines().enumerate() {
            let line_no = number + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }

            if let Some(type_name) = line.strip_suffix('{') {
                if current.is_some() {
                    warn!(target: targets::MARKUP, line = line_no, "nested block, previous block closed");
                }
                current = Some(type_name.trim().to_owned());
                sheet.rules.entry(type_name.trim().to_owned()).or_default();
                continue;
            }
            if line == "}" {
                if current.take().is_none() {
                    warn!(target: targets::MARKUP, line = line_no, "stray closing brace");
                }
                continue;
            }

            let Some(type_name) = &current else {
                warn!(target: targets::MARKUP, line = line_no, "property outside a block, skipped");
                continue;
            };
            let Some((key, value)) = line.split_once(':') else {
                warn!(target: targets::MARKUP, line = line_no, "malformed style line, skipped");
                continue;
            };
            let value = value.trim().trim_end_matches(';').trim_end();
            sheet
                .rules
                .entry(type_name.clone())
                .or_default()
                .insert(key.trim().to_owned(), value.to_owned());
        }

        if current.is_some() {
            warn!(target: targets::MARKUP, "unterminated style block");
        }
        sheet
    }

    /// Look up one property for a widget type.
    pub fn get(&self, type_name: &str, property: &str) -> Option<&str> {
        self.rules
            .get(type_name)?
            .get(property)
            .map(String::as_str)
    }

    /// All properties recorded for a widget type.
    pub fn properties(&self, type_name: &str) -> Option<&HashMap<String, String>> {
        self.rules.get(type_name)
    }

    /// Number of type blocks in the sheet.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_and_comments() {
        let sheet = StyleSheet::parse(
            "// defaults\nButton {\n    background-color: #3355AA;\n    text-color: #FFFFFF;\n}\n# hash comment\nLabel {\n    font-size: 14;\n}\n",
        );
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.get("Button", "background-color"), Some("#3355AA"));
        assert_eq!(sheet.get("Label", "font-size"), Some("14"));
        assert_eq!(sheet.get("Button", "font-size"), None);
        assert_eq!(sheet.get("Window", "title"), None);
    }

    #[test]
    fn test_missing_semicolon_tolerated() {
        let sheet = StyleSheet::parse("Panel {\n  opacity: 0.5\n}\n");
        assert_eq!(sheet.get("Panel", "opacity"), Some("0.5"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let sheet = StyleSheet::parse("Panel {\n  what even is this\n  opacity: 1;\n}\nstray: line\n");
        assert_eq!(sheet.get("Panel", "opacity"), Some("1"));
        assert_eq!(sheet.properties("Panel").unwrap().len(), 1);
    }
}
