//! Schema annotation tokenizer.

use std::mem;

use indexmap::IndexMap;
use serde::Serialize;

/// Annotation value that excludes a field from the emitted schema.
pub const SUPPRESS_MARKER: &str = "-";

/// A parsed schema annotation.
///
/// Equality ignores option order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Explicit `name=` option, the positional first token, or the field name.
    pub primary_name: String,
    /// Option key to raw value. Bare flags map to `"true"`.
    pub options: IndexMap<String, String>,
}

impl Tag {
    /// Create a tag with no options.
    pub fn new(primary_name: impl Into<String>) -> Self {
        Self {
            primary_name: primary_name.into(),
            options: IndexMap::new(),
        }
    }

    /// Add an option (builder style).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get an option value.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Returns true if a bare flag (or `key=true`) is present.
    pub fn flag(&self, key: &str) -> bool {
        self.option(key) == Some("true")
    }

    /// The `description` option.
    pub fn description(&self) -> Option<&str> {
        self.option("description")
    }

    /// Split the `decorators=[...]` option into its items.
    ///
    /// Items are separated by commas outside parentheses and quotes. A leading
    /// `+` on each item is dropped, so `[+doc(a: "x, y"), +unique()]` yields
    /// `doc(a: "x, y")` and `unique()`.
    pub fn decorators(&self) -> Vec<String> {
        let Some(raw) = self.option("decorators") else {
            return Vec::new();
        };
        let raw = raw.trim();
        let inner = raw
            .strip_prefix('[')
            .map(|s| s.strip_suffix(']').unwrap_or(s))
            .unwrap_or(raw);

        let mut items = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;
        let mut in_quotes = false;

        for ch in inner.chars() {
            match ch {
                '"' => {
                    in_quotes = !in_quotes;
                    current.push(ch);
                }
                '(' if !in_quotes => {
                    depth += 1;
                    current.push(ch);
                }
                ')' if !in_quotes => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                ',' if !in_quotes && depth == 0 => {
                    push_decorator(&mut items, &current);
                    current.clear();
                }
                _ => current.push(ch),
            }
        }
        push_decorator(&mut items, &current);
        items
    }
}

fn push_decorator(items: &mut Vec<String>, raw: &str) {
    let item = raw.trim();
    let item = item.strip_prefix('+').unwrap_or(item).trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Parse a schema annotation.
///
/// Returns `None` when `raw` is empty, is the suppression marker `-`, or
/// names nothing and collects no option. A lone positional token such as
/// `username` still yields a tag carrying that primary name.
/// `fallback_name` becomes the primary name when the annotation names
/// nothing itself.
///
/// ```
/// use gqlschema_tag::parse_tag;
///
/// let tag = parse_tag("description=The ID of the user", "id").unwrap();
/// assert_eq!(tag.primary_name, "id");
/// assert_eq!(tag.description(), Some("The ID of the user"));
/// ```
pub fn parse_tag(raw: &str, fallback_name: &str) -> Option<Tag> {
    if raw.is_empty() || raw == SUPPRESS_MARKER {
        return None;
    }

    let mut scanner = Scanner::default();
    for ch in raw.chars() {
        scanner.feed(ch);
    }
    scanner.finish(fallback_name)
}

#[derive(Debug, Default)]
struct Scanner {
    key: String,
    value: String,
    /// A `=` has been seen in the current segment.
    keyed: bool,
    in_quotes: bool,
    escaped: bool,
    bracket_depth: usize,
    /// The previous character was a top-level separator.
    after_separator: bool,
    segment: usize,
    positional: Option<String>,
    options: IndexMap<String, String>,
}

impl Scanner {
    fn at_top_level(&self) -> bool {
        !self.in_quotes && self.bracket_depth == 0
    }

    fn feed(&mut self, ch: char) {
        if mem::take(&mut self.after_separator) && ch == ' ' {
            return;
        }

        if mem::take(&mut self.escaped) {
            self.value.push(ch);
            return;
        }

        match ch {
            '\\' => self.escaped = true,
            '"' => {
                self.in_quotes = !self.in_quotes;
                self.value.push(ch);
            }
            '[' if !self.in_quotes => {
                self.bracket_depth += 1;
                self.value.push(ch);
            }
            ']' if !self.in_quotes => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.value.push(ch);
            }
            ',' if self.at_top_level() => {
                self.commit_segment();
                self.after_separator = true;
            }
            '=' if self.at_top_level() && !self.keyed => {
                self.key = mem::take(&mut self.value);
                self.keyed = true;
            }
            _ => self.value.push(ch),
        }
    }

    fn commit_segment(&mut self) {
        let value = mem::take(&mut self.value);
        if mem::take(&mut self.keyed) {
            self.options.insert(mem::take(&mut self.key), value);
        } else {
            self.commit_bare(value);
        }
        self.segment += 1;
    }

    fn commit_bare(&mut self, token: String) {
        if token.is_empty() {
            return;
        }
        if self.segment == 0 {
            self.positional = Some(token);
        } else {
            self.options.insert(token, "true".to_string());
        }
    }

    fn finish(mut self, fallback_name: &str) -> Option<Tag> {
        let value = mem::take(&mut self.value);
        if self.keyed {
            if !self.key.is_empty() && !value.is_empty() {
                let key = mem::take(&mut self.key);
                self.options.insert(key, value);
            }
        } else {
            self.commit_bare(value);
        }

        if self.options.is_empty() && self.positional.is_none() {
            return None;
        }

        let primary_name = self
            .options
            .get("name")
            .filter(|name| !name.is_empty())
            .cloned()
            .or(self.positional)
            .unwrap_or_else(|| fallback_name.to_string());

        Some(Tag {
            primary_name,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(tag: &Tag) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = tag
            .options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(parse_tag("", "id"), None);
    }

    #[test]
    fn test_single_option_uses_fallback_name() {
        let tag = parse_tag("description=The ID of the user", "id").unwrap();
        assert_eq!(
            tag,
            Tag::new("id").with_option("description", "The ID of the user")
        );
    }

    #[test]
    fn test_bracketed_list_is_not_split() {
        let tag = parse_tag(
            "username, description=The username of the user,decorators=[+unique()]",
            "Username",
        )
        .unwrap();

        assert_eq!(tag.primary_name, "username");
        assert_eq!(
            options(&tag),
            vec![
                ("decorators", "[+unique()]"),
                ("description", "The username of the user"),
            ]
        );
    }

    #[test]
    fn test_commas_inside_brackets_and_quotes() {
        let raw = r#"taggedField, omitempty, description=This is a tagged field, decorators=[+doc(description: \"This field is tagged.\"), +requireAuthRole(role: \"admin\"))]"#;
        let tag = parse_tag(raw, "TaggedField").unwrap();

        assert_eq!(tag.primary_name, "taggedField");
        assert_eq!(tag.option("omitempty"), Some("true"));
        assert!(tag.flag("omitempty"));
        assert_eq!(tag.description(), Some("This is a tagged field"));
        assert_eq!(
            tag.option("decorators"),
            Some(
                r#"[+doc(description: "This field is tagged."), +requireAuthRole(role: "admin"))]"#
            )
        );
        assert_eq!(tag.options.len(), 3);
    }

    #[test]
    fn test_quoted_value_keeps_commas() {
        let tag = parse_tag(r#"description="a, b and c", deprecated"#, "f").unwrap();
        assert_eq!(tag.description(), Some(r#""a, b and c""#));
        assert!(tag.flag("deprecated"));
    }

    #[test]
    fn test_only_first_equals_splits() {
        let tag = parse_tag("default=key=value=stillValue", "f").unwrap();
        assert_eq!(tag.option("default"), Some("key=value=stillValue"));
    }

    #[test]
    fn test_explicit_name_wins() {
        let tag = parse_tag("ignored, name=renamed, description=x", "f").unwrap();
        assert_eq!(tag.primary_name, "renamed");
        assert_eq!(tag.option("name"), Some("renamed"));
    }

    #[test]
    fn test_suppress_marker_has_no_options() {
        assert_eq!(parse_tag(SUPPRESS_MARKER, "Password"), None);
    }

    #[test]
    fn test_bare_name_only_renames() {
        let tag = parse_tag("username", "Username").unwrap();
        assert_eq!(tag, Tag::new("username"));
        assert!(tag.options.is_empty());

        assert_eq!(parse_tag(",", "Username"), None);
    }

    #[test]
    fn test_trailing_flag_is_kept() {
        let tag = parse_tag("description=x, deprecated", "f").unwrap();
        assert!(tag.flag("deprecated"));
    }

    #[test]
    fn test_trailing_empty_value_is_dropped() {
        let tag = parse_tag("description=x, default=", "f").unwrap();
        assert_eq!(tag.option("default"), None);

        let tag = parse_tag("default=, description=x", "f").unwrap();
        assert_eq!(tag.option("default"), Some(""));
    }

    #[test]
    fn test_only_one_space_after_comma_is_skipped() {
        let tag = parse_tag("a=1,  b=2", "f").unwrap();
        assert_eq!(tag.option(" b"), Some("2"));

        let tag = parse_tag("description=two  spaces inside", "f").unwrap();
        assert_eq!(tag.description(), Some("two  spaces inside"));
    }

    #[test]
    fn test_escaped_characters_are_literal() {
        let tag = parse_tag(r"description=a\, b\=c\[d", "f").unwrap();
        assert_eq!(tag.description(), Some("a, b=c[d"));
        assert_eq!(tag.options.len(), 1);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let tag = parse_tag(r#"description="open, deprecated"#, "f").unwrap();
        assert_eq!(tag.description(), Some(r#""open, deprecated"#));
        assert_eq!(tag.options.len(), 1);
    }

    #[test]
    fn test_unterminated_bracket_swallows_rest() {
        let tag = parse_tag("decorators=[+unique(), description=x", "f").unwrap();
        assert_eq!(tag.option("decorators"), Some("[+unique(), description=x"));
        assert_eq!(tag.description(), None);
    }

    #[test]
    fn test_equality_ignores_option_order() {
        let a = Tag::new("f").with_option("a", "1").with_option("b", "2");
        let b = Tag::new("f").with_option("b", "2").with_option("a", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_decorators() {
        let tag = parse_tag(
            r#"decorators=[+doc(description: "x, y"), +requireAuthRole(role: "admin")]"#,
            "f",
        )
        .unwrap();
        assert_eq!(
            tag.decorators(),
            vec![
                r#"doc(description: "x, y")"#.to_string(),
                r#"requireAuthRole(role: "admin")"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_decorators_absent() {
        assert!(Tag::new("f").decorators().is_empty());
        let tag = Tag::new("f").with_option("decorators", "[]");
        assert!(tag.decorators().is_empty());
    }
}
