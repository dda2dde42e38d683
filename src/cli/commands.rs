//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, Report};

use crate::format::{format_diff, format_source};
use nodelang_syntax::{lexer, parser};

use super::{CliError, CliResult, ExitCode};

/// Source files larger than this are rejected before reading.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// File extension of nodelang sources.
pub const SOURCE_EXTENSION: &str = "nl";

/// Read a source file into memory.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (16 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Render a diagnostic against its source with miette's report handler.
pub fn render_diagnostic<E>(file_path: &Path, source: &str, err: E) -> String
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(err).with_source_code(NamedSource::new(file_path.display().to_string(), source.to_string()));
    format!("{report:?}")
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source)
        .map_err(|err| CliError::failure(render_diagnostic(file_path, &source, err).trim_end()))?;

    for tok in &tokens {
        println!("{:>5}..{:<5} {:?}", tok.span.start, tok.span.end, tok.kind);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let module = parser::parse(&source)
        .map_err(|err| CliError::failure(render_diagnostic(file_path, &source, err).trim_end()))?;
    println!("{:#?}", module);
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and report the first error, if any.
pub fn check_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    match parser::parse(&source) {
        Ok(module) => {
            println!("✓ {}: {} declaration(s)", file_path.display(), module.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(CliError::failure(render_diagnostic(file_path, &source, err).trim_end())),
    }
}

/// Format every `.nl` file under `path`.
///
/// With `check_mode` or `diff_mode` no file is written; the command fails if any file would change.
pub fn format_files(path: &Path, check_mode: bool, diff_mode: bool) -> CliResult<ExitCode> {
    let files = collect_source_files(path);

    if files.is_empty() {
        return Err(CliError::failure(format!("No .{SOURCE_EXTENSION} files found")));
    }

    let mut needs_formatting = false;
    let mut formatted_count = 0;
    let mut error_count = 0;

    for file_path in &files {
        let source = match read_source(file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                error_count += 1;
                continue;
            }
        };

        match format_source(&source) {
            Ok(formatted) => {
                let changed = source != formatted;

                if diff_mode && changed {
                    println!("--- {}", file_path.display());
                    if let Ok(Some(diff)) = format_diff(&source) {
                        print!("{}", diff);
                    }
                    println!();
                }

                if check_mode {
                    if changed {
                        println!("Would reformat: {}", file_path.display());
                        needs_formatting = true;
                    }
                } else if diff_mode {
                    if changed {
                        needs_formatting = true;
                    }
                } else if changed {
                    if let Err(e) = fs::write(file_path, &formatted) {
                        eprintln!("Error writing {}: {}", file_path.display(), e);
                        error_count += 1;
                    } else {
                        println!("Formatted: {}", file_path.display());
                        formatted_count += 1;
                    }
                }
            }
            Err(err) => {
                eprintln!("{}", render_diagnostic(file_path, &source, err));
                error_count += 1;
            }
        }
    }

    if check_mode || diff_mode {
        if needs_formatting {
            let msg = if diff_mode {
                "need formatting"
            } else {
                "would be reformatted"
            };
            return Err(CliError::failure(format!("\n{} file(s) {}", files.len(), msg)));
        } else if error_count == 0 {
            println!("✓ {} file(s) already formatted", files.len());
        }
    } else {
        println!("\n✓ {} file(s) formatted, {} error(s)", formatted_count, error_count);
    }

    if error_count > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }

    Ok(ExitCode::SUCCESS)
}

/// `path` itself if it is a source file, else every source file below it (skipping hidden directories and
/// `target`), in sorted order.
pub fn collect_source_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" {
                        files.extend(collect_source_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_diagnostic_mentions_error() {
        let source = "const a = (1";
        let err = parser::parse(source).unwrap_err();
        let rendered = render_diagnostic(Path::new("a.nl"), source, err);
        assert!(rendered.contains("unexpected end of input"), "{rendered}");
    }

    #[test]
    fn test_collect_source_files() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::create_dir_all(dir.join(".hidden")).unwrap();
        fs::write(dir.join("b.nl"), "").unwrap();
        fs::write(dir.join("nested/a.nl"), "").unwrap();
        fs::write(dir.join(".hidden/c.nl"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let files = collect_source_files(dir);
        assert_eq!(files, vec![dir.join("b.nl"), dir.join("nested/a.nl")]);
        assert_eq!(collect_source_files(&dir.join("b.nl")), vec![dir.join("b.nl")]);
        assert!(collect_source_files(&dir.join("notes.txt")).is_empty());
    }

    #[test]
    fn test_format_files_writes_and_checks() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("shader.nl");
        fs::write(&file, "const a = 1+2").unwrap();

        assert!(format_files(temp.path(), true, false).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), "const a = 1+2");

        assert_eq!(format_files(temp.path(), false, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&file).unwrap(), "const a = (1 + 2)\n");

        assert_eq!(format_files(temp.path(), true, false).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_format_files_reports_parse_errors() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.nl"), "const = 1").unwrap();
        assert!(format_files(temp.path(), false, false).is_err());
    }

    #[test]
    fn test_check_file() {
        let temp = tempdir().unwrap();
        let good = temp.path().join("good.nl");
        let bad = temp.path().join("bad.nl");
        fs::write(&good, "const a = 1\nconst b = a").unwrap();
        fs::write(&bad, "const a = $").unwrap();

        assert_eq!(check_file(&good).unwrap(), ExitCode::SUCCESS);
        let err = check_file(&bad).unwrap_err();
        assert!(err.message.contains("unknown token"), "{}", err.message);
        assert!(check_file(&temp.path().join("missing.nl")).is_err());
    }

    #[test]
    fn test_check_file_reports_deep_nesting() {
        let temp = tempdir().unwrap();
        let deep = temp.path().join("deep.nl");
        let depth = 100_000;
        fs::write(&deep, format!("const a = {}{}", "[".repeat(depth), "]".repeat(depth))).unwrap();

        let err = check_file(&deep).unwrap_err();
        assert!(err.message.contains("nesting deeper than"), "{}", err.message);
    }
}
