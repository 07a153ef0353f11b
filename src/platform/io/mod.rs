use std::path::Path;

use anyhow::Context;

/// 入力ファイルを読み込んで文字列にする
pub async fn read_input(path: &Path) -> Result<String, anyhow::Error> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(decode_text(&bytes))
}

/// バイト列をテキストとして解釈する。
/// 順序は以下の通り：
/// - UTF-8（BOM は除去）
/// - GBK（エラーなしで解釈できた場合のみ）
/// - Latin-1（必ず成功する）
pub fn decode_text(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.strip_prefix('\u{feff}').unwrap_or(text).to_string();
    }

    let (text, had_errors) = encoding_rs::GBK.decode_without_bom_handling(bytes);
    if !had_errors {
        log::debug!(target: "Io::Decode", "input decoded as GBK");
        return text.into_owned();
    }

    log::debug!(target: "Io::Decode", "input decoded as Latin-1");
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("道可道，非常道".as_bytes());
        assert_eq!(decode_text(&bytes), "道可道，非常道");
    }

    #[test]
    fn gbk_input() {
        let (bytes, _, had_errors) = encoding_rs::GBK.encode("三人行，必有我师焉");
        assert!(!had_errors);
        assert!(std::str::from_utf8(&bytes).is_err());
        assert_eq!(decode_text(&bytes), "三人行，必有我师焉");
    }

    #[test]
    fn latin1_as_last_resort() {
        assert_eq!(decode_text(b"caf\xff"), "caf\u{ff}");
    }

    #[test]
    fn read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let text = runtime.block_on(read_input(&path)).unwrap();
        assert_eq!(text, "line one\nline two\n");

        let missing = runtime.block_on(read_input(&dir.path().join("nope.txt")));
        assert!(missing.is_err());
    }
}
