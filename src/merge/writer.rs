//! Assembling and writing the merged file.

use crate::error::{MergeError, MergeResult};
use std::path::Path;

/// Reference header line followed by every translated line, `\n`-joined.
pub fn build_output<S: AsRef<str>>(header_line: &str, lines: &[S]) -> String {
    let capacity = header_line.len() + lines.iter().map(|l| l.as_ref().len() + 1).sum::<usize>();
    let mut output = String::with_capacity(capacity);
    output.push_str(header_line);
    for line in lines {
        output.push('\n');
        output.push_str(line.as_ref());
    }
    output
}

/// Overwrite `path` with `contents` in one write.
pub fn write_output(path: &Path, contents: &str) -> MergeResult<()> {
    std::fs::write(path, contents)
        .map_err(|source| MergeError::WriteOutput { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn header_comes_first_without_trailing_newline() {
        let out = build_output("Net ID,Check-In Date", &["1,2024-01-01,", "2,2024-02-01,"]);
        assert_eq!(out, "Net ID,Check-In Date\n1,2024-01-01,\n2,2024-02-01,");
    }

    #[test]
    fn header_is_kept_verbatim() {
        let out = build_output("\"Net ID\", Check-In Date", &Vec::<String>::new());
        assert_eq!(out, "\"Net ID\", Check-In Date");
    }

    #[test]
    fn write_output_replaces_existing_file() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("MERGED.csv");
        std::fs::write(&path, "old contents that are longer").expect("seed");

        write_output(&path, "A\n1,").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "A\n1,");
    }

    #[test]
    fn write_output_reports_the_path_on_failure() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("missing").join("MERGED.csv");
        let err = write_output(&path, "A").unwrap_err();
        assert!(matches!(err, MergeError::WriteOutput { .. }));
        assert!(err.to_string().contains("MERGED.csv"));
    }
}
