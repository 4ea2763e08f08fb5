use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for fbgen-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the schema text and its file name together so diagnostics can
/// point back into the JSON document.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = self.offset_of(source.line(), source.column()).map(|at| {
            let len = self.src[at..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
            SourceSpan::from((at, len))
        });
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an unresolved reference error, labeling the first quoted
    /// occurrence of the name in the document.
    pub fn unresolved(
        &self,
        kind: ReferenceKind,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::Unresolved {
            src: self.named_source(),
            span: self.find_quoted(&name),
            kind,
            name,
            referenced_by: referenced_by.into(),
        })
    }

    /// Create a duplicate definition error.
    pub fn duplicate(&self, name: impl Into<String>) -> Box<Error> {
        let name = name.into();
        let short = name.rsplit('.').next().unwrap_or(&name).to_string();
        Box::new(Error::Duplicate {
            src: self.named_source(),
            span: self.find_quoted(&short),
            name,
        })
    }

    fn find_quoted(&self, text: &str) -> Option<SourceSpan> {
        let needle = format!("\"{text}\"");
        self.src
            .find(&needle)
            .map(|at| SourceSpan::from((at + 1, text.len())))
    }

    /// Convert a 1-based line/column pair into a byte offset.
    fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        let mut offset = 0;
        for (index, text) in self.src.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                let column = column.saturating_sub(1).min(text.len());
                return Some(offset + column).filter(|at| *at < self.src.len());
            }
            offset += text.len();
        }
        None
    }
}

/// What kind of definition a dangling reference was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Struct,
    Enum,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Struct => f.write_str("struct or table"),
            Self::Enum => f.write_str("enum or union"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the resolved schema JSON produced by the front end"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse resolved schema")]
    #[diagnostic(code(fbgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown {kind} '{name}' referenced by '{referenced_by}'")]
    #[diagnostic(
        code(fbgen::unresolved),
        help("references use the fully qualified name, e.g. 'MyGame.Sample.Monster'")
    )]
    Unresolved {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        kind: ReferenceKind,
        name: String,
        referenced_by: String,
    },

    #[error("'{name}' is defined more than once")]
    #[diagnostic(code(fbgen::duplicate))]
    Duplicate {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicate definition")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("no struct or table named '{name}'")]
    #[diagnostic(code(fbgen::unknown_struct))]
    UnknownStruct { name: String },

    #[error("no enum or union named '{name}'")]
    #[diagnostic(code(fbgen::unknown_enum))]
    UnknownEnum { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_maps_line_and_column() {
        let ctx = SourceContext::new("{\n  \"a\": 1,\n  x\n}", "schema.json");
        assert_eq!(ctx.offset_of(1, 1), Some(0));
        assert_eq!(ctx.offset_of(3, 3), Some(14));
        assert_eq!(ctx.offset_of(9, 1), None);
    }

    #[test]
    fn test_unresolved_labels_quoted_name() {
        let ctx = SourceContext::new(r#"{"name": "Game.Vec3"}"#, "schema.json");
        let err = ctx.unresolved(ReferenceKind::Struct, "Game.Vec3", "Game.Monster.pos");
        match *err {
            Error::Unresolved { span, .. } => {
                let span = span.unwrap();
                assert_eq!(span.offset(), 10);
                assert_eq!(span.len(), 9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UnknownStruct {
            name: "Game.Vec3".into(),
        };
        assert_eq!(err.to_string(), "no struct or table named 'Game.Vec3'");
    }
}
