//! Line-oriented text builder with indentation.

/// Indentation style for emitted SDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// This many spaces per level.
    Spaces(u8),
    Tab,
}

impl Indent {
    fn push_level(&self, buffer: &mut String) {
        match *self {
            Self::Spaces(width) => buffer.extend(std::iter::repeat_n(' ', usize::from(width))),
            Self::Tab => buffer.push('\t'),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

/// Fluent API for building indented text.
///
/// # Example
///
/// ```
/// use gqlschema_emit::{CodeBuilder, Indent};
///
/// let sdl = CodeBuilder::new(Indent::Spaces(2))
///     .block_with_close("type User {", "}", |b| b.line("id: String!"))
///     .build();
///
/// assert_eq!(sdl, "type User {\n  id: String!\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add an SDL description line (`"text"`), escaping quotes and backslashes.
    pub fn description(self, text: &str) -> Self {
        let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
        self.line(&format!("\"{escaped}\""))
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.indent.push_level(&mut self.buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_widths() {
        let nested = |indent| {
            CodeBuilder::new(indent)
                .indent()
                .indent()
                .line("x")
                .build()
        };
        assert_eq!(nested(Indent::Spaces(3)), "      x\n");
        assert_eq!(nested(Indent::Tab), "\t\tx\n");
        assert_eq!(nested(Indent::default()), "    x\n");
    }

    #[test]
    fn test_block() {
        let text = CodeBuilder::new(Indent::Spaces(4))
            .block_with_close("enum Roles {", "}", |b| b.line("USER").line("ADMIN"))
            .build();

        assert_eq!(text, "enum Roles {\n    USER\n    ADMIN\n}\n");
    }

    #[test]
    fn test_description_is_escaped() {
        let text = CodeBuilder::new(Indent::Tab)
            .indent()
            .description(r#"Say "hi" \o/"#)
            .build();

        assert_eq!(text, "\t\"Say \\\"hi\\\" \\\\o/\"\n");
    }

    #[test]
    fn test_when_and_each() {
        let text = CodeBuilder::new(Indent::default())
            .when(false, |b| b.line("skipped"))
            .each(["a", "b"], |b, s| b.line(s))
            .when(true, |b| b.line("c"))
            .build();

        assert_eq!(text, "a\nb\nc\n");
    }
}
