//! Field type expressions such as `Option<Vec<User>>`.

use std::{fmt, str::FromStr};

use gqlschema_reflect::ScalarKind;
use thiserror::Error;

/// Marker for an inline anonymous record whose fields follow the type.
pub const INLINE_RECORD: &str = "_";

/// A parsed field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Scalar(ScalarKind),
    /// A declared record or enum.
    Named(String),
    /// `_`
    Inline,
    Option(Box<TypeExpr>),
    List(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// The `_` inside this expression, if any.
    pub fn contains_inline(&self) -> bool {
        match self {
            TypeExpr::Inline => true,
            TypeExpr::Scalar(_) | TypeExpr::Named(_) => false,
            TypeExpr::Option(inner) | TypeExpr::List(inner) => inner.contains_inline(),
            TypeExpr::Map { key, value } => key.contains_inline() || value.contains_inline(),
        }
    }

    /// Declared names referenced by this expression, outermost first.
    pub fn named(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_named(&mut names);
        names
    }

    fn collect_named<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Named(name) => names.push(name),
            TypeExpr::Scalar(_) | TypeExpr::Inline => {}
            TypeExpr::Option(inner) | TypeExpr::List(inner) => inner.collect_named(names),
            TypeExpr::Map { key, value } => {
                key.collect_named(names);
                value.collect_named(names);
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(kind) => write!(f, "{kind}"),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Inline => f.write_str(INLINE_RECORD),
            TypeExpr::Option(inner) => write!(f, "Option<{inner}>"),
            TypeExpr::List(inner) => write!(f, "Vec<{inner}>"),
            TypeExpr::Map { key, value } => write!(f, "Map<{key}, {value}>"),
        }
    }
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let expr = parser.expr()?;
        parser.skip_whitespace();
        if parser.pos < s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }
}

/// A type expression that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeExprError {
    pub message: String,
    /// Byte offset into the expression.
    pub offset: usize,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: impl Into<String>) -> TypeExprError {
        TypeExprError {
            message: message.into(),
            offset: self.pos,
        }
    }

    fn ident(&mut self) -> Result<&'a str, TypeExprError> {
        let start = self.pos;
        while let Some(c) = self.peek().filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn arguments(&mut self) -> Result<Vec<TypeExpr>, TypeExprError> {
        self.skip_whitespace();
        if self.peek() != Some('<') {
            return Ok(Vec::new());
        }
        self.pos += 1;

        let mut args = vec![self.expr()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    args.push(self.expr()?);
                }
                Some('>') => {
                    self.pos += 1;
                    return Ok(args);
                }
                _ => return Err(self.error("expected ',' or '>'")),
            }
        }
    }

    fn expr(&mut self) -> Result<TypeExpr, TypeExprError> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.ident()?;
        let mut args = self.arguments()?;
        let count = args.len();

        let arity_error = |expected: usize, found: usize| TypeExprError {
            message: format!("'{name}' takes {expected} type argument(s), found {found}"),
            offset: start,
        };

        let expr = match name {
            "Option" => match args.pop() {
                Some(inner) if args.is_empty() => TypeExpr::Option(Box::new(inner)),
                _ => return Err(arity_error(1, count)),
            },
            "Box" => match args.pop() {
                Some(inner) if args.is_empty() => inner,
                _ => return Err(arity_error(1, count)),
            },
            "Vec" | "VecDeque" | "HashSet" | "BTreeSet" | "IndexSet" => match args.pop() {
                Some(inner) if args.is_empty() => TypeExpr::List(Box::new(inner)),
                _ => return Err(arity_error(1, count)),
            },
            "Map" | "HashMap" | "BTreeMap" | "IndexMap" => {
                let value = args.pop();
                let key = args.pop();
                match (key, value) {
                    (Some(key), Some(value)) if count == 2 => TypeExpr::Map {
                        key: Box::new(key),
                        value: Box::new(value),
                    },
                    _ => return Err(arity_error(2, count)),
                }
            }
            _ if !args.is_empty() => {
                return Err(TypeExprError {
                    message: format!("'{name}' does not take type arguments"),
                    offset: start,
                });
            }
            INLINE_RECORD => TypeExpr::Inline,
            _ => match ScalarKind::from_name(name) {
                Some(kind) => TypeExpr::Scalar(kind),
                None if name.starts_with(|c: char| c.is_ascii_digit()) => {
                    return Err(TypeExprError {
                        message: format!("'{name}' is not a valid type name"),
                        offset: start,
                    });
                }
                None => TypeExpr::Named(name.to_string()),
            },
        };
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TypeExpr {
        s.parse().unwrap()
    }

    #[test]
    fn test_scalars_and_names() {
        assert_eq!(parse("String"), TypeExpr::Scalar(ScalarKind::String));
        assert_eq!(parse("u64"), TypeExpr::Scalar(ScalarKind::U64));
        assert_eq!(parse("User"), TypeExpr::Named("User".into()));
        assert_eq!(parse("_"), TypeExpr::Inline);
    }

    #[test]
    fn test_nested() {
        let expr = parse("Option< Vec<Map<String, Option<User>>> >");
        assert_eq!(expr.to_string(), "Option<Vec<Map<string, Option<User>>>>");
        assert_eq!(expr.named(), vec!["User"]);
        assert!(!expr.contains_inline());

        assert!(parse("Vec<_>").contains_inline());
        assert_eq!(parse("Box<bool>"), TypeExpr::Scalar(ScalarKind::Bool));
    }

    #[test]
    fn test_errors() {
        let err = "Map<String>".parse::<TypeExpr>().unwrap_err();
        assert_eq!(err.message, "'Map' takes 2 type argument(s), found 1");
        assert_eq!(err.offset, 0);

        let err = "Vec<User".parse::<TypeExpr>().unwrap_err();
        assert_eq!(err.message, "expected ',' or '>'");
        assert_eq!(err.offset, 8);

        let err = "User<String>".parse::<TypeExpr>().unwrap_err();
        assert_eq!(err.message, "'User' does not take type arguments");

        let err = "Option<String> x".parse::<TypeExpr>().unwrap_err();
        assert_eq!(err.message, "unexpected trailing input");
        assert_eq!(err.offset, 15);

        assert!("".parse::<TypeExpr>().is_err());
        assert!("1st".parse::<TypeExpr>().is_err());
        assert!("Vec<>".parse::<TypeExpr>().is_err());
    }
}
