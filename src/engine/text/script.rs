/// Which wrapping strategy (and font family) a piece of text needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Contains CJK ideographs or Japanese kana; broken per character.
    Wide,
    /// Everything else; broken at spaces.
    Latin,
}

impl Script {
    pub fn detect(text: &str) -> Self {
        if has_wide_script(text) {
            Script::Wide
        } else {
            Script::Latin
        }
    }
}

/// CJK Unified Ideographs, Hiragana or Katakana.
pub fn is_wide_char(ch: char) -> bool {
    matches!(ch as u32, 0x4E00..=0x9FFF | 0x3040..=0x309F | 0x30A0..=0x30FF)
}

pub fn has_wide_script(text: &str) -> bool {
    text.chars().any(is_wide_char)
}
