//! Interchange (wire-name) annotation parsing.

use serde::Serialize;

use crate::SUPPRESS_MARKER;

/// Wire encoding forced by an interchange annotation option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    String,
    Int,
    Float,
    Bool,
}

impl TargetType {
    fn from_option(option: &str) -> Option<Self> {
        match option {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

/// A parsed interchange annotation such as `email,omitempty`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterchangeTag {
    /// Wire name, if the annotation gives one.
    pub name: Option<String>,
    /// The field is excluded from interchange (`-`).
    pub private: bool,
    pub omit_empty: bool,
    pub target: Option<TargetType>,
}

/// Parse an interchange annotation. Returns `None` for an empty annotation.
///
/// A first part of `-` marks the field private; any options after it are
/// still read.
pub fn parse_interchange(raw: &str) -> Option<InterchangeTag> {
    if raw.is_empty() {
        return None;
    }

    let mut tag = InterchangeTag::default();
    let mut parts = raw.split(',');
    let first = parts.next().unwrap_or_default();

    if first == SUPPRESS_MARKER {
        tag.private = true;
    } else if !first.is_empty() {
        tag.name = Some(first.to_string());
    }

    for part in parts.map(str::trim) {
        if part == "omitempty" {
            tag.omit_empty = true;
        } else if let Some(target) = TargetType::from_option(part) {
            tag.target = Some(target);
        }
    }

    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(parse_interchange(""), None);
    }

    #[test]
    fn test_name_only() {
        let tag = parse_interchange("id").unwrap();
        assert_eq!(tag.name.as_deref(), Some("id"));
        assert!(!tag.private);
        assert!(!tag.omit_empty);
        assert_eq!(tag.target, None);
    }

    #[test]
    fn test_private() {
        let tag = parse_interchange("-").unwrap();
        assert!(tag.private);
        assert_eq!(tag.name, None);
    }

    #[test]
    fn test_dash_first_part_is_private() {
        let tag = parse_interchange("-,omitempty").unwrap();
        assert!(tag.private);
        assert!(tag.omit_empty);
        assert_eq!(tag.name, None);

        assert!(parse_interchange("-,").unwrap().private);
    }

    #[test]
    fn test_options() {
        let tag = parse_interchange("phone,omitempty").unwrap();
        assert_eq!(tag.name.as_deref(), Some("phone"));
        assert!(tag.omit_empty);

        let tag = parse_interchange("count, string").unwrap();
        assert_eq!(tag.target, Some(TargetType::String));
    }

    #[test]
    fn test_options_without_name() {
        let tag = parse_interchange(",omitempty").unwrap();
        assert_eq!(tag.name, None);
        assert!(tag.omit_empty);
    }

    #[test]
    fn test_unknown_options_ignored() {
        let tag = parse_interchange("id,inline,float").unwrap();
        assert_eq!(tag.target, Some(TargetType::Float));
        assert!(!tag.omit_empty);
    }
}
