//! Plain-text extraction strategy.

use std::path::Path;

use super::ExtractError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read the whole file at `path` as UTF-8 text.
///
/// A leading byte-order mark is dropped.  Any other byte sequence that is not
/// valid UTF-8 is an error rather than being replaced.
pub fn read_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    String::from_utf8(body.to_vec()).map_err(|e| ExtractError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_utf8_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Héllo wörld\nline two").unwrap();

        assert_eq!(read_text(&path).unwrap(), "Héllo wörld\nline two");
    }

    #[test]
    fn strips_byte_order_mark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        std::fs::write(&path, b"\xEF\xBB\xBFHello").unwrap();

        assert_eq!(read_text(&path).unwrap(), "Hello");
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, [0xFF, 0xFE, 0xFD]).unwrap();

        assert!(matches!(read_text(&path), Err(ExtractError::Encoding(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("gone.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
        assert!(err.to_string().contains("gone.txt"));
    }
}
