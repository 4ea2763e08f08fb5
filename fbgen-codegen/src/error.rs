use std::path::PathBuf;

use thiserror::Error;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while emitting code.
///
/// Apart from `Io` and `Config`, every variant means the schema handed
/// over by the front end broke a contract the emitters rely on.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] Box<fbgen_schema::Error>),

    #[error("union field `{table}.{field}` has no `{field}_type` discriminant field")]
    MissingUnionType { table: String, field: String },

    #[error("default value `{value}` of field `{field}` is not a valid {expected} literal")]
    InvalidDefault {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("expected a scalar type, found {ty}")]
    NotScalar { ty: String },

    #[error("`{name}` is a table but is stored inline in fixed struct `{parent}`")]
    ExpectedFixedStruct { name: String, parent: String },

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options in '{}'", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_messages() {
        let err = Error::MissingUnionType {
            table: "Game.Monster".into(),
            field: "equipped".into(),
        };
        assert_eq!(
            err.to_string(),
            "union field `Game.Monster.equipped` has no `equipped_type` discriminant field"
        );

        let err = Error::InvalidDefault {
            field: "hp".into(),
            value: "lots".into(),
            expected: "integer",
        };
        assert_eq!(
            err.to_string(),
            "default value `lots` of field `hp` is not a valid integer literal"
        );
    }

    #[test]
    fn test_schema_errors_convert() {
        let schema_err = Box::new(fbgen_schema::Error::UnknownStruct {
            name: "Game.Vec4".into(),
        });
        let err: Error = schema_err.into();
        assert!(matches!(err, Error::Schema(_)));
    }
}
