//! Formatting configuration for nodelang

use nodelang_syntax::serialize::SerializeOptions;

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Calls with more arguments than this are written one argument per line
    pub max_inline_args: usize,
    /// Number of spaces before each wrapped call argument
    pub indent_width: usize,
    /// Whether formatted files end with a newline
    pub trailing_newline: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_inline_args: 4,
            indent_width: 2,
            trailing_newline: true,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the call-argument wrap threshold
    pub fn with_max_inline_args(mut self, count: usize) -> Self {
        self.max_inline_args = count;
        self
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = enabled;
        self
    }

    pub(crate) fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            max_inline_args: self.max_inline_args,
            indent_width: self.indent_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_config() {
        let config = FormatConfig::default();
        assert_eq!(config.max_inline_args, 4);
        assert_eq!(config.indent_width, 2);
        assert!(config.trailing_newline);
        assert_eq!(FormatConfig::new(), config);
    }

    #[test]
    fn test_default_matches_serializer_defaults() {
        assert_eq!(FormatConfig::default().serialize_options(), SerializeOptions::default());
    }

    // ========================================
    // Builder method tests
    // ========================================

    #[test]
    fn test_with_indent_width() {
        let config = FormatConfig::new().with_indent_width(4);
        assert_eq!(config.indent_width, 4);
        // Other fields unchanged
        assert_eq!(config.max_inline_args, 4);
    }

    #[test]
    fn test_builder_chain_all() {
        let config = FormatConfig::new()
            .with_max_inline_args(2)
            .with_indent_width(8)
            .with_trailing_newline(false);

        assert_eq!(
            config.serialize_options(),
            SerializeOptions {
                max_inline_args: 2,
                indent_width: 8
            }
        );
        assert!(!config.trailing_newline);
    }

    #[test]
    fn test_builder_override() {
        let config = FormatConfig::new().with_max_inline_args(2).with_max_inline_args(6);

        assert_eq!(config.max_inline_args, 6); // Last value wins
    }
}
