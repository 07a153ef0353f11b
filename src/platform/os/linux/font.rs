//! Linux のシステムフォント取得
//!
//! ディストリ差が大きいため、
//! ある確率が高そうなものを列挙する

use crate::platform::font::FontFamilies;
use std::path::PathBuf;

pub fn system_font_families() -> FontFamilies {
    FontFamilies {
        cjk: vec![
            // Noto CJK（Debian/Ubuntu, Fedora, Arch で場所が違う）
            PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
            PathBuf::from("/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc"),
            PathBuf::from("/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc"),
            PathBuf::from("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
            // WenQuanYi
            PathBuf::from("/usr/share/fonts/truetype/wqy/wqy-microhei.ttc"),
            PathBuf::from("/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc"),
            // Droid
            PathBuf::from("/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf"),
        ],
        latin: vec![
            // DejaVu
            PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            // Noto
            PathBuf::from("/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"),
            // Liberation
            PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"),
            // FreeFont
            PathBuf::from("/usr/share/fonts/truetype/freefont/FreeSans.ttf"),
        ],
    }
}
