//! Front-matter parsing

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Delimiter line that opens and closes the header block
pub const DELIMITER: &str = "---";

/// Errors produced when a document has no well-formed header block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("document does not start with a `---` line")]
    MissingOpeningDelimiter,

    #[error("front-matter block is not closed by a `---` line")]
    MissingClosingDelimiter,
}

/// Flat key/value metadata decoded from a document header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

impl FrontMatter {
    /// Create an empty front-matter block
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let (first, mut rest) =
            next_line(content).ok_or(FrontMatterError::MissingOpeningDelimiter)?;
        if first != DELIMITER {
            return Err(FrontMatterError::MissingOpeningDelimiter);
        }

        let mut fm = FrontMatter::new();
        loop {
            let (line, remaining) =
                next_line(rest).ok_or(FrontMatterError::MissingClosingDelimiter)?;
            if line == DELIMITER {
                return Ok((fm, remaining));
            }
            fm.decode_line(line);
            rest = remaining;
        }
    }

    /// Decode a single `key: value` header line, skipping anything else
    fn decode_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.insert(key, unquote(value.trim()));
    }

    /// Set a field, replacing any previous value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a field, treating blank values as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the header and append `body`, producing a document that
    /// `parse` reads back to the same fields and body
    pub fn to_document(&self, body: &str) -> String {
        let mut out = String::from(DELIMITER);
        out.push('\n');
        for (key, value) in self.iter() {
            out.push_str(&format!("{}: \"{}\"\n", key, value));
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(body);
        out
    }
}

/// Split off the first line, accepting both `\n` and `\r\n` endings.
/// Returns `None` once the input is exhausted.
fn next_line(input: &str) -> Option<(&str, &str)> {
    if input.is_empty() {
        return None;
    }
    let (line, rest) = match input.find('\n') {
        Some(pos) => (&input[..pos], &input[pos + 1..]),
        None => (input, ""),
    };
    Some((line.strip_suffix('\r').unwrap_or(line), rest))
}

/// Strip one matching pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "React Best Practices"
date: 2023-06-01
category: Web Development
---
# Heading

Body text.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("React Best Practices"));
        assert_eq!(fm.get("date"), Some("2023-06-01"));
        assert_eq!(fm.get("category"), Some("Web Development"));
        assert_eq!(body, "# Heading\n\nBody text.\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\nauthor: \"Jane\"\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Windows"));
        assert_eq!(fm.get("author"), Some("Jane"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let content = "---\ncover: https://example.com/a.png\ntitle: A: B\n---\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("cover"), Some("https://example.com/a.png"));
        assert_eq!(fm.get("title"), Some("A: B"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_skips_blank_and_colonless_lines() {
        let content = "---\n\njust some words\n: no key\ntitle: Kept\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("title"), Some("Kept"));
    }

    #[test]
    fn test_only_one_pair_of_quotes_stripped() {
        let content = "---\na: \"\"double\"\"\nb: \"unbalanced\nc: \"\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("a"), Some("\"double\""));
        assert_eq!(fm.get("b"), Some("\"unbalanced"));
        assert_eq!(fm.get("c"), Some("\""));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let content = "---\ntitle: First\nauthor: A\ntitle: Second\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Second"));
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "author"]);
    }

    #[test]
    fn test_empty_header() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_input() {
        let (fm, body) = FrontMatter::parse("---\ntitle: T\n---").unwrap();
        assert_eq!(fm.get("title"), Some("T"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        assert_eq!(
            FrontMatter::parse("# Just markdown\n").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
        assert_eq!(
            FrontMatter::parse("").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
        // Delimiter must start at column zero and be exactly three hyphens
        assert_eq!(
            FrontMatter::parse(" ---\ntitle: T\n---\n").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
        assert_eq!(
            FrontMatter::parse("----\ntitle: T\n---\n").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
    }

    #[test]
    fn test_missing_closing_delimiter() {
        assert_eq!(
            FrontMatter::parse("---\ntitle: T\nbody without end\n").unwrap_err(),
            FrontMatterError::MissingClosingDelimiter
        );
        assert_eq!(
            FrontMatter::parse("---\ntitle: T\n--- \nbody\n").unwrap_err(),
            FrontMatterError::MissingClosingDelimiter
        );
    }

    #[test]
    fn test_body_keeps_later_delimiters() {
        let content = "---\ntitle: T\n---\nintro\n---\nmore\n";
        let (_, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(body, "intro\n---\nmore\n");
    }

    #[test]
    fn test_to_document_reparses() {
        let mut fm = FrontMatter::new();
        fm.insert("title", "Quotes \"inside\" and: colons");
        fm.insert("date", "2023-06-01");
        fm.insert("excerpt", "");
        fm.insert("cover", "\"already quoted\"");

        let doc = fm.to_document("Body\n");
        let (parsed, body) = FrontMatter::parse(&doc).unwrap();
        assert_eq!(parsed, fm);
        assert_eq!(body, "Body\n");
    }
}
