//! Indented text output for rendered fragments.

use super::{CodeFragment, Indent};

/// Accumulates generated source text at a current nesting depth.
///
/// Every method consumes and returns the builder so file preambles can be
/// written as one chain.
///
/// ```
/// use fbgen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let code = CodeBuilder::default()
///     .lines(["// automatically generated by fbgen, do not modify"])
///     .blank()
///     .emit([CodeFragment::block(
///         "public final class Vec3 extends Struct {",
///         vec![CodeFragment::line("public float x() { return bb.getFloat(bb_pos + 0); }")],
///         Some("}".to_string()),
///     )])
///     .build();
///
/// assert_eq!(
///     code,
///     "// automatically generated by fbgen, do not modify\n\n\
///      public final class Vec3 extends Struct {\n  public float x() { return bb.getFloat(bb_pos + 0); }\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    unit: Indent,
    depth: usize,
    out: String,
}

impl CodeBuilder {
    pub fn new(unit: Indent) -> Self {
        Self {
            unit,
            depth: 0,
            out: String::new(),
        }
    }

    /// One line at the current depth.
    pub fn line(mut self, text: impl AsRef<str>) -> Self {
        self.write_line(text.as_ref());
        self
    }

    /// Several lines at the current depth. Accepts slices and options alike.
    pub fn lines<I>(mut self, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref());
        }
        self
    }

    /// An empty line. Never indented.
    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    /// Text appended verbatim.
    pub fn raw(mut self, text: &str) -> Self {
        self.out.push_str(text);
        self
    }

    /// Content written one level deeper.
    pub fn indented(mut self, f: impl FnOnce(Self) -> Self) -> Self {
        self.depth += 1;
        let mut inner = f(self);
        inner.depth = inner.depth.saturating_sub(1);
        inner
    }

    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    pub fn when_some<T>(self, value: Option<T>, f: impl FnOnce(Self, T) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Lay out rendered fragments.
    pub fn emit(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        for fragment in fragments {
            self.write(fragment);
        }
        self
    }

    pub fn build(self) -> String {
        self.out
    }

    fn write(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => self.write_line(&text),
            CodeFragment::Blank => self.out.push('\n'),
            CodeFragment::Raw(text) => self.out.push_str(&text),
            CodeFragment::Directive(text) => {
                self.out.push_str(&text);
                self.out.push('\n');
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.write_line(&header);
                self.write_nested(body);
                if let Some(close) = close {
                    self.write_line(&close);
                }
            }
            CodeFragment::Indent(body) => self.write_nested(body),
            CodeFragment::Sequence(body) => body.into_iter().for_each(|f| self.write(f)),
        }
    }

    fn write_nested(&mut self, body: Vec<CodeFragment>) {
        self.depth += 1;
        body.into_iter().for_each(|f| self.write(f));
        self.depth -= 1;
    }

    fn write_line(&mut self, text: &str) {
        self.out.push_str(&self.unit.repeat(self.depth));
        self.out.push_str(text);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indented_closure() {
        let code = CodeBuilder::default()
            .line("public struct Vec3")
            .line("{")
            .indented(|b| b.line("private Struct __p;"))
            .line("};")
            .build();

        assert_eq!(code, "public struct Vec3\n{\n  private Struct __p;\n};\n");
    }

    #[test]
    fn test_optional_lines() {
        let nullable: Option<&str> = None;
        let code = CodeBuilder::default()
            .when(false, |b| b.line("@SuppressWarnings(\"unused\")"))
            .lines(["import java.nio.*;", "import java.lang.*;"])
            .when_some(nullable, |b, line| b.line(line).blank())
            .lines(Some("@javax.annotation.Generated(value=\"fbgen\")"))
            .build();

        assert_eq!(
            code,
            "import java.nio.*;\nimport java.lang.*;\n@javax.annotation.Generated(value=\"fbgen\")\n"
        );
    }

    #[test]
    fn test_block_fragment() {
        let code = CodeBuilder::default()
            .emit([CodeFragment::block(
                "while (span != 0) {",
                vec![CodeFragment::line("int middle = span / 2;")],
                Some("}".to_string()),
            )])
            .build();
        assert_eq!(code, "while (span != 0) {\n  int middle = span / 2;\n}\n");
    }

    #[test]
    fn test_directive_ignores_indentation() {
        let code = CodeBuilder::default()
            .indented(|b| {
                b.emit([
                    CodeFragment::directive("#if ENABLE_SPAN_T"),
                    CodeFragment::line(
                        "public Span<byte> GetNameBytes() { return __p.__vector_as_span(4); }",
                    ),
                    CodeFragment::directive("#endif"),
                ])
            })
            .build();
        assert_eq!(
            code,
            "#if ENABLE_SPAN_T\n  public Span<byte> GetNameBytes() { return __p.__vector_as_span(4); }\n#endif\n"
        );
    }

    #[test]
    fn test_nested_sequence_and_indent() {
        let code = CodeBuilder::new(Indent::Tab)
            .raw("// header\n")
            .emit([CodeFragment::sequence(vec![
                CodeFragment::line("a;"),
                CodeFragment::Indent(vec![CodeFragment::line("b;")]),
                CodeFragment::Blank,
            ])])
            .line("c;")
            .build();
        assert_eq!(code, "// header\na;\n\tb;\n\nc;\n");
    }
}
