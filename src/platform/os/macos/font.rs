//! macOS のシステムフォント取得

use crate::platform::font::FontFamilies;
use std::path::PathBuf;

/// macOS のシステムフォント候補を返す
pub fn system_font_families() -> FontFamilies {
    FontFamilies {
        cjk: vec![
            // 中国語
            PathBuf::from("/System/Library/Fonts/PingFang.ttc"),
            PathBuf::from("/System/Library/Fonts/STHeiti Light.ttc"),
            PathBuf::from("/System/Library/Fonts/STHeiti Medium.ttc"),
            PathBuf::from("/System/Library/Fonts/Supplemental/Songti.ttc"),
            // 日本語（ヒラギノ）
            PathBuf::from("/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
            PathBuf::from("/System/Library/Fonts/ヒラギノ明朝 ProN.ttc"),
        ],
        latin: vec![
            PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
            PathBuf::from("/System/Library/Fonts/SFNS.ttf"),
            PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"),
            PathBuf::from("/System/Library/Fonts/Supplemental/Times New Roman.ttf"),
            PathBuf::from("/System/Library/Fonts/Supplemental/Georgia.ttf"),
        ],
    }
}
