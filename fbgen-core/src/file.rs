use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk below `base`
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_file(&self.path(base), self.render().as_bytes())
    }
}

/// Write `content`, creating parent directories. Files that already hold
/// identical bytes are left untouched so build tools see no change.
pub(crate) fn write_file(path: &Path, content: &[u8]) -> Result<WriteResult> {
    if let Ok(existing) = std::fs::read(path)
        && existing == content
    {
        tracing::trace!(path = %path.display(), "unchanged");
        return Ok(WriteResult::Unchanged);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    tracing::trace!(path = %path.display(), bytes = content.len(), "written");
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had this content
    Unchanged,
}

/// A file to be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
}

impl File {
    /// Create a text file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into().into_bytes(),
        }
    }

    /// Create a file holding raw bytes
    pub fn binary(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content as bytes
    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    /// Get the file content as text (lossy for binary files)
    pub fn content(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file
    pub fn write(&self) -> Result<WriteResult> {
        write_file(&self.path, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, b"hello").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("Test.java");

        write_file(&path, b"nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, b"first").unwrap();
        let result = write_file(&path, b"second").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_identical_content_is_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Monster.cs");

        let file = File::new(&path, "same");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_binary_file_round_trips_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("monster.mon");

        let file = File::binary(&path, vec![0u8, 159, 146, 150]);
        file.write().unwrap();

        assert_eq!(fs::read(&path).unwrap(), [0u8, 159, 146, 150]);
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        let file = File::new(&path, "content");
        assert!(!file.exists());

        fs::write(&path, "content").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn test_generated_file_trait_writes_below_base() {
        struct Stub;
        impl GeneratedFile for Stub {
            fn path(&self, base: &Path) -> PathBuf {
                base.join("Game").join("Stub.java")
            }
            fn render(&self) -> String {
                "class Stub {}\n".to_string()
            }
        }

        let temp = TempDir::new().unwrap();
        assert_eq!(Stub.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("Game").join("Stub.java")).unwrap(),
            "class Stub {}\n"
        );
    }
}
