//! Text File Reading
//!
//! ログファイルを行単位で読み込む（UTF-8 / UTF-16LE のBOMに対応）

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// ファイル全体を読み込み、行に分割する
///
/// 不正なバイト列は置換文字に変換する
pub fn read_text_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).context(format!("Failed to read log file: {}", path.display()))?;
    Ok(decode(&bytes).lines().map(|line| line.to_string()).collect())
}

fn decode(bytes: &[u8]) -> String {
    // PowerShell の Out-File は既定で UTF-16LE
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_utf8_with_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(b"first\r\nsecond\n").unwrap();

        let lines = read_text_lines(file.path()).unwrap();

        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_read_utf16le() {
        let mut file = NamedTempFile::new().unwrap();
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Log Name: System\nLevel: Error".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        file.write_all(&bytes).unwrap();

        let lines = read_text_lines(file.path()).unwrap();

        assert_eq!(lines, vec!["Log Name: System", "Level: Error"]);
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xFFbad\n").unwrap();

        let lines = read_text_lines(file.path()).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("bad"));
    }

    #[test]
    fn test_read_missing_file_is_error() {
        assert!(read_text_lines(Path::new("/nonexistent/file.log")).is_err());
    }
}
