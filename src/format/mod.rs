//! nodelang Code Formatter
//!
//! Formatting is parse + canonical serialization:
//! - Binary operations fully parenthesized
//! - Calls with more than 4 arguments wrapped one argument per line, indented 2 spaces
//! - Identifiers quoted only when they have to be
//! - Doc comments (`///`) kept; plain `#` comments are dropped

mod config;

pub use config::FormatConfig;

use nodelang_syntax::diagnostics::ParseError;
use nodelang_syntax::parser;
use nodelang_syntax::serialize::serialize_module_with;

/// Format nodelang source code with default settings
pub fn format_source(source: &str) -> Result<String, ParseError> {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format nodelang source code with custom configuration
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> Result<String, ParseError> {
    let module = parser::parse(source)?;
    let mut formatted = serialize_module_with(&module, &config.serialize_options());
    if config.trailing_newline && !formatted.is_empty() {
        formatted.push('\n');
    }
    Ok(formatted)
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, ParseError> {
    let formatted = format_source(source)?;
    Ok(source == formatted)
}

/// Get the diff between original and formatted source
pub fn format_diff(source: &str) -> Result<Option<String>, ParseError> {
    let formatted = format_source(source)?;

    if source == formatted {
        return Ok(None);
    }

    // Simple line-by-line diff
    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();

    let max_lines = original_lines.len().max(formatted_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied().unwrap_or("");
        let fmt = formatted_lines.get(i).copied().unwrap_or("");

        if orig != fmt {
            if !orig.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if !fmt.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }

    Ok(Some(diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // format_source tests
    // ========================================

    #[test]
    fn test_format_source_canonicalizes() {
        let source = "const  x=1+2*3   # trailing comment\nconst y = f( x , )";
        assert_eq!(
            format_source(source).unwrap(),
            "const x = (1 + (2 * 3))\nconst y = f(x)\n"
        );
    }

    #[test]
    fn test_format_source_keeps_doc_comments() {
        let source = "///  two spaces\nconst a: f32[3] = [1.0, 2.0, 3.0]\n";
        assert_eq!(
            format_source(source).unwrap(),
            "///  two spaces\nconst a: f32[3] = [1.0, 2.0, 3.0]\n"
        );
    }

    #[test]
    fn test_format_source_invalid_syntax() {
        assert!(format_source("const a = (1").is_err());
        assert!(format_source("const a = 1 )").is_err());
    }

    #[test]
    fn test_format_source_empty() {
        assert_eq!(format_source("").unwrap(), "");
        assert_eq!(format_source("# only a comment\n").unwrap(), "");
    }

    // ========================================
    // format_source_with_config tests
    // ========================================

    #[test]
    fn test_format_source_with_custom_config() {
        let config = FormatConfig::new()
            .with_max_inline_args(1)
            .with_indent_width(4)
            .with_trailing_newline(false);
        assert_eq!(
            format_source_with_config("const c = f(1, 2)", &config).unwrap(),
            "const c = f(\n    1,\n    2\n)"
        );
    }

    // ========================================
    // check_formatted tests
    // ========================================

    #[test]
    fn test_check_formatted() {
        assert!(check_formatted("const a = (1 + 2)\n").unwrap());
        assert!(!check_formatted("const a = 1 + 2\n").unwrap());
        assert!(check_formatted("const a = (").is_err());
    }

    // ========================================
    // format_diff tests
    // ========================================

    #[test]
    fn test_format_diff_no_changes() {
        assert_eq!(format_diff("const a = 1\n").unwrap(), None);
    }

    #[test]
    fn test_format_diff_returns_diff() {
        let diff = format_diff("const a = 1\nconst b = a*2\n").unwrap().unwrap();
        assert_eq!(diff, "-   2 | const b = a*2\n+   2 | const b = (a * 2)\n");
    }
}
