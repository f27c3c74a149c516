//! Task plumbing shared between `main.rs` and its tests: turning a parsed
//! `Decode` command into a file read, a decode, and an XML render.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read `path`, decode it as NRBF, and render the result as XML.
///
/// Mirrors the CLI contract directly: callers print the returned string to
/// stdout on `Ok`, or `Error: {err}` to stderr on `Err`.
pub fn decode_file_to_xml(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let root = nrbf_core::deserialize(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(root.as_xml(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn decodes_a_header_only_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut bytes = vec![0x00];
        bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        file.write_all(&bytes).unwrap();

        let xml = decode_file_to_xml(file.path()).unwrap();
        assert!(xml.contains("<SerializedStreamHeader>"));
        assert!(xml.contains("<RootId>1</RootId>"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(decode_file_to_xml(Path::new("/nonexistent/path.bin")).is_err());
    }
}
