//! Windows のシステムフォント取得

use crate::platform::font::FontFamilies;
use std::path::PathBuf;

/// システムフォント候補を返す
pub fn system_font_families() -> FontFamilies {
    FontFamilies {
        cjk: vec![
            // 中国語
            PathBuf::from(r"C:\Windows\Fonts\simhei.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\simsun.ttc"),
            PathBuf::from(r"C:\Windows\Fonts\msyh.ttc"),
            PathBuf::from(r"C:\Windows\Fonts\msyhbd.ttc"),
            PathBuf::from(r"C:\Windows\Fonts\simfang.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\simkai.ttf"),
            // 日本語
            PathBuf::from(r"C:\Windows\Fonts\meiryo.ttc"),
            PathBuf::from(r"C:\Windows\Fonts\msgothic.ttc"),
            PathBuf::from(r"C:\Windows\Fonts\msmincho.ttc"),
        ],
        latin: vec![
            PathBuf::from(r"C:\Windows\Fonts\arial.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\segoeui.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\times.ttf"),
            PathBuf::from(r"C:\Windows\Fonts\georgia.ttf"),
        ],
    }
}
