//! Indentation unit of generated sources.

const SPACES: &str = "                ";

/// One level of indentation.
///
/// Both backends emit two spaces per level; the width is kept
/// configurable so fragments can be rendered for other layouts in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Text of a single level. Widths above 16 are clamped.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Spaces(n) => &SPACES[..usize::from(n).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }

    /// Text of `level` nested levels.
    pub fn repeat(&self, level: usize) -> String {
        self.as_str().repeat(level)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(3).as_str(), "   ");
        assert_eq!(Indent::Spaces(0).as_str(), "");
        assert_eq!(Indent::Spaces(40).as_str().len(), 16);
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_repeat() {
        assert_eq!(Indent::default().repeat(3), "      ");
        assert_eq!(Indent::Tab.repeat(2), "\t\t");
        assert_eq!(Indent::Tab.repeat(0), "");
    }
}
