//! Motif file reader: one token per line, no header.

use std::fs;
use std::path::Path;

use crate::encoding::Token;
use crate::error::{EncodeError, Result};

/// Split file content into tokens.
///
/// `\n` and `\r\n` terminators are stripped. Blank lines stay as empty-string
/// tokens; a terminator at the very end does not add one.
pub fn parse_tokens(content: &str) -> Vec<Token> {
    content.lines().map(str::to_string).collect()
}

/// Read every token from `path`. An empty file is an error.
///
/// Bytes that are not valid UTF-8 become U+FFFD in the token text.
pub fn read_tokens(path: impl AsRef<Path>) -> Result<Vec<Token>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| EncodeError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = parse_tokens(&String::from_utf8_lossy(&bytes));
    if tokens.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn one_token_per_line() {
        assert_eq!(parse_tokens("AAT\nCCG\nAAT\n"), vec!["AAT", "CCG", "AAT"]);
        assert_eq!(parse_tokens("AAT\r\nCCG"), vec!["AAT", "CCG"]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(parse_tokens("\n"), vec![""]);
        assert_eq!(parse_tokens("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(parse_tokens("").is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_token() {
        assert_eq!(parse_tokens(" AAT\nAAT \n"), vec![" AAT", "AAT "]);
    }

    #[test]
    fn empty_file_is_empty_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(read_tokens(file.path()), Err(EncodeError::EmptyInput)));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_tokens(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, EncodeError::FileNotFound { .. }));
    }

    #[test]
    fn reads_tokens_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GGC\nAAT\n").unwrap();
        assert_eq!(read_tokens(file.path()).unwrap(), vec!["GGC", "AAT"]);
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe\nAAT\n").unwrap();
        let tokens = read_tokens(file.path()).unwrap();
        assert_eq!(tokens, vec!["\u{FFFD}\u{FFFD}", "AAT"]);
    }

    #[test]
    fn directory_is_reported_as_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_tokens(dir.path()).unwrap_err();
        assert!(matches!(err, EncodeError::FileNotFound { .. }));
    }
}
