//! システムフォント取得の Facade
//!
//! 候補の優先順位:
//! 1. 利用者が指定したフォントファイル
//! 2. 文字種に合ったシステムフォント（CJK なら CJK フォントを先に）
//! 3. 組み込みのプレースホルダフォント

use std::path::{Path, PathBuf};

use crate::engine::text::Script;
use crate::platform::os;
use crate::platform::renderer::glyph::FontSource;

/// OS ごとのフォント候補（系統別）
#[derive(Debug, Clone, Default)]
pub struct FontFamilies {
    pub cjk: Vec<PathBuf>,
    pub latin: Vec<PathBuf>,
}

impl FontFamilies {
    /// 文字種に合わせて並べた候補
    pub fn ranked(self, script: Script) -> Vec<PathBuf> {
        let (first, second) = match script {
            Script::Wide => (self.cjk, self.latin),
            Script::Latin => (self.latin, self.cjk),
        };
        first.into_iter().chain(second).collect()
    }
}

/// フォント候補を順位付きで返す
pub trait FontLocator: Send + Sync {
    fn candidates(&self, script: Script) -> Vec<PathBuf>;
}

/// 実行中の OS の既知パスを使う
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFontLocator;

impl FontLocator for SystemFontLocator {
    fn candidates(&self, script: Script) -> Vec<PathBuf> {
        system_font_families().ranked(script)
    }
}

#[cfg(target_os = "windows")]
pub fn system_font_families() -> FontFamilies {
    os::windows::font::system_font_families()
}

#[cfg(target_os = "macos")]
pub fn system_font_families() -> FontFamilies {
    os::macos::font::system_font_families()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn system_font_families() -> FontFamilies {
    os::linux::font::system_font_families()
}

/// 指定フォント → locator の候補の順に並べる
pub fn ranked_candidates(
    custom: Option<&Path>,
    script: Script,
    locator: &dyn FontLocator,
) -> Vec<PathBuf> {
    custom
        .map(Path::to_path_buf)
        .into_iter()
        .chain(locator.candidates(script))
        .collect()
}

/// `text_sample` の文字種に合うフォントを返す。
pub fn resolve_font_source(
    custom: Option<&Path>,
    text_sample: &str,
    locator: &dyn FontLocator,
) -> FontSource {
    resolve_script_font(custom, Script::detect(text_sample), locator)
}

/// 最初に読み込めた候補を返す。どれも駄目なら組み込みフォント。
pub fn resolve_script_font(
    custom: Option<&Path>,
    script: Script,
    locator: &dyn FontLocator,
) -> FontSource {
    if let Some(path) = custom
        && !path.is_file()
    {
        log::warn!(target: "Font::Custom", "custom font not found: {}", path.display());
    }

    for path in ranked_candidates(custom, script, locator) {
        if !path.is_file() {
            continue;
        }
        match FontSource::from_path(&path) {
            Ok(source) => {
                log::info!(target: "Font::Resolve", "using font {} for {script:?} text", path.display());
                return source;
            }
            Err(e) => {
                log::debug!(target: "Font::Resolve", "skipping {}: {e}", path.display());
            }
        }
    }

    log::warn!(target: "Font::Resolve", "no usable font file found; falling back to the built-in placeholder font");
    FontSource::builtin()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocator(FontFamilies);

    impl FontLocator for FixedLocator {
        fn candidates(&self, script: Script) -> Vec<PathBuf> {
            self.0.clone().ranked(script)
        }
    }

    fn families() -> FontFamilies {
        FontFamilies {
            cjk: vec![PathBuf::from("/fonts/cjk.ttc")],
            latin: vec![PathBuf::from("/fonts/latin.ttf")],
        }
    }

    #[test]
    fn wide_script_prefers_cjk_fonts() {
        let ranked = families().ranked(Script::Wide);
        assert_eq!(ranked, vec![PathBuf::from("/fonts/cjk.ttc"), PathBuf::from("/fonts/latin.ttf")]);
    }

    #[test]
    fn latin_script_prefers_latin_fonts() {
        let ranked = families().ranked(Script::Latin);
        assert_eq!(ranked, vec![PathBuf::from("/fonts/latin.ttf"), PathBuf::from("/fonts/cjk.ttc")]);
    }

    #[test]
    fn custom_path_comes_first() {
        let locator = FixedLocator(families());
        let ranked = ranked_candidates(Some(Path::new("/mine.otf")), Script::Wide, &locator);
        assert_eq!(ranked[0], PathBuf::from("/mine.otf"));
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn unusable_candidates_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.ttf");
        std::fs::write(&broken, b"not a font").unwrap();

        let locator = FixedLocator(FontFamilies {
            cjk: vec![dir.path().join("missing.ttc")],
            latin: vec![broken.clone()],
        });

        let source = resolve_font_source(Some(&broken), "道可道", &locator);
        assert!(source.is_builtin());
    }

    #[test]
    fn system_lists_are_not_empty() {
        let families = system_font_families();
        assert!(!families.cjk.is_empty());
        assert!(!families.latin.is_empty());
    }
}
