use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A hierarchical namespace path such as `MyGame.Sample`.
///
/// Compared by value: two definitions share a namespace when their
/// component lists are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    components: Vec<String>,
}

impl Namespace {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted path (`"MyGame.Sample"`); the empty string is the root.
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|part| !part.is_empty()))
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// The components joined with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.components.join(separator)
    }

    /// `name` prefixed by every component, dot separated.
    pub fn qualify(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}.{}", self.join("."), name)
        }
    }

    /// Directory for files declared in this namespace, below `base`.
    pub fn dir(&self, base: &Path) -> PathBuf {
        self.components
            .iter()
            .fold(base.to_path_buf(), |path, part| path.join(part))
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_qualify() {
        let ns = Namespace::parse("MyGame.Sample");
        assert_eq!(ns.components(), ["MyGame", "Sample"]);
        assert_eq!(ns.qualify("Monster"), "MyGame.Sample.Monster");
        assert_eq!(Namespace::parse("").qualify("Monster"), "Monster");
    }

    #[test]
    fn test_dir() {
        let ns = Namespace::parse("MyGame.Sample");
        assert_eq!(
            ns.dir(Path::new("out")),
            Path::new("out").join("MyGame").join("Sample")
        );
        assert_eq!(Namespace::default().dir(Path::new("out")), Path::new("out"));
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let ns: Namespace = serde_json::from_str(r#"["A", "B"]"#).unwrap();
        assert_eq!(ns, Namespace::new(["A", "B"]));
        assert_eq!(serde_json::to_string(&ns).unwrap(), r#"["A","B"]"#);
    }
}
