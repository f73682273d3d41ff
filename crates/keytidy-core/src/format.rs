// Keytidy Keymap Formatter
// Conservative brace-based re-indenter for devicetree keymap sources

use std::fs;
use std::path::Path;

/// Spaces per indent level; tabs expand to the same width.
const INDENT_WIDTH: usize = 4;

/// Errors that can occur while formatting a keymap file
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether `format_file` had to rewrite the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Output differed from the input and was written back.
    Rewritten,
    /// Input was already formatted; nothing was written.
    Unchanged,
}

/// Normalize a devicetree-style keymap source.
///
/// - 4-space indentation derived from `{`/`}` nesting (depth never below 0)
/// - `#include` lines stay at column 0
/// - trailing whitespace trimmed, tabs expanded
/// - runs of blank lines collapse to one; none at start or end of file
/// - output always ends with exactly one newline
///
/// Content and ordering are preserved; no semantic changes.
pub fn format_lines(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut depth: usize = 0;
    let mut last_was_blank = false;

    for raw in input.lines() {
        let line = raw.trim_end().replace('\t', &" ".repeat(INDENT_WIDTH));

        if line.trim().is_empty() {
            if !last_was_blank && !out.is_empty() {
                out.push(String::new());
                last_was_blank = true;
            }
            continue;
        }
        last_was_blank = false;

        let stripped = line.trim_start();
        let pre_depth = depth;

        // A closing line aligns with the block it closes
        if stripped.starts_with('}') {
            depth = depth.saturating_sub(1);
        }

        if stripped.starts_with("#include") {
            out.push(stripped.to_string());
        } else {
            out.push(format!("{}{}", " ".repeat(depth * INDENT_WIDTH), stripped));
        }

        // Recompute from the pre-line depth so a line that both opens and
        // closes braces nets out correctly
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        depth = (pre_depth + opens).saturating_sub(closes);
    }

    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Format a keymap file in place, writing only if the output differs
/// byte-for-byte from the input.
pub fn format_file<P: AsRef<Path>>(path: P) -> Result<FormatOutcome, FormatError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FormatError::NotAFile(path.display().to_string()));
    }

    let original = String::from_utf8_lossy(&fs::read(path)?).into_owned();
    let formatted = format_lines(&original);

    if formatted == original {
        log::debug!("{} already formatted", path.display());
        return Ok(FormatOutcome::Unchanged);
    }

    fs::write(path, &formatted)?;
    Ok(FormatOutcome::Rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_indentation() {
        let input = "/ {\nkeymap {\nlabel;\n};\n};\n";
        let expected = "/ {\n    keymap {\n        label;\n    };\n};\n";
        assert_eq!(format_lines(input), expected);
    }

    #[test]
    fn test_idempotent() {
        let input = "/ {\n  keymap {\n\tbindings = <&kp A>;\n  };\n};\n\n\n";
        let once = format_lines(input);
        assert_eq!(format_lines(&once), once);
    }

    #[test]
    fn test_include_stays_at_column_zero() {
        let input = "/ {\n#include <behaviors.dtsi>\nnode;\n};\n";
        let expected = "/ {\n#include <behaviors.dtsi>\n    node;\n};\n";
        assert_eq!(format_lines(input), expected);
    }

    #[test]
    fn test_closing_brace_aligns_with_opener() {
        let input = "a {\nb {\nc;\n};\n};\n";
        let formatted = format_lines(input);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[3], "    };");
        assert_eq!(lines[4], "};");
    }

    #[test]
    fn test_open_and_close_on_one_line() {
        let input = "a {\nempty { };\nnext;\n};\n";
        let expected = "a {\n    empty { };\n    next;\n};\n";
        assert_eq!(format_lines(input), expected);
    }

    #[test]
    fn test_blank_lines_collapse() {
        let input = "a;\n\n\n\nb;\n";
        assert_eq!(format_lines(input), "a;\n\nb;\n");
    }

    #[test]
    fn test_leading_blank_lines_removed() {
        let input = "\n\na;\n";
        assert_eq!(format_lines(input), "a;\n");
    }

    #[test]
    fn test_trailing_blank_lines_removed() {
        let input = "a;\n\n\n";
        assert_eq!(format_lines(input), "a;\n");
    }

    #[test]
    fn test_tabs_expand_and_trailing_whitespace_trimmed() {
        let input = "a {\n\tb;   \n};\n";
        assert_eq!(format_lines(input), "a {\n    b;\n};\n");
    }

    #[test]
    fn test_missing_final_newline_added() {
        assert_eq!(format_lines("a;"), "a;\n");
    }

    #[test]
    fn test_unbalanced_closers_clamp_at_zero() {
        let input = "};\n};\na;\n";
        assert_eq!(format_lines(input), "};\n};\na;\n");
    }

    #[test]
    fn test_empty_input_yields_single_newline() {
        assert_eq!(format_lines(""), "\n");
        assert_eq!(format_lines("\n\n"), "\n");
    }

    #[test]
    fn test_format_file_rewrites_then_reports_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corne.keymap");
        std::fs::write(&path, "/ {\nkeymap {\n};\n};\n").unwrap();

        assert_eq!(format_file(&path).unwrap(), FormatOutcome::Rewritten);
        let formatted = std::fs::read_to_string(&path).unwrap();
        assert_eq!(formatted, "/ {\n    keymap {\n    };\n};\n");

        assert_eq!(format_file(&path).unwrap(), FormatOutcome::Unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), formatted);
    }

    #[test]
    fn test_format_file_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.keymap");
        assert!(matches!(
            format_file(&path),
            Err(FormatError::NotAFile(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_format_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            format_file(dir.path()),
            Err(FormatError::NotAFile(_))
        ));
    }
}
