use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font as _, FontArc, PxScale};
use fontdue::{Font as FontDue, FontSettings};
use thiserror::Error;

use crate::engine::bridge::text::{FontProvider, SizedFont};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {origin}: {reason}")]
    Parse { origin: FontOrigin, reason: String },

    #[error("invalid font size: {0}")]
    InvalidSize(u32),
}

/// フォントの出どころ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    /// フォントファイル
    File(PathBuf),
    /// 呼び出し側から渡されたバイト列（ID付き）
    Memory(String),
    /// フォントファイルなしの組み込みプレースホルダ
    Builtin,
}

impl fmt::Display for FontOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontOrigin::File(path) => write!(f, "{}", path.display()),
            FontOrigin::Memory(id) => write!(f, "memory:{id}"),
            FontOrigin::Builtin => write!(f, "<builtin>"),
        }
    }
}

/// 読み込み済みのフォント
///
/// パースはファイルごとに一度だけ行い、結果はワーカー間で読み取り専用で共有する。
/// サイズごとのハンドルは [`FontSource::load`] で作るが、中身は共有したまま。
#[derive(Clone)]
pub struct FontSource {
    origin: FontOrigin,
    faces: Option<Faces>,
}

/// fontdue で計測、ab_glyph で描画
#[derive(Clone)]
struct Faces {
    metrics: Arc<FontDue>,
    outline: FontArc,
}

impl FontSource {
    /// フォントファイルを読み込む
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_origin(FontOrigin::File(path.to_path_buf()), bytes)
    }

    /// バイト列からフォントを読み込む
    pub fn from_bytes(id: &str, bytes: Vec<u8>) -> Result<Self, FontError> {
        Self::with_origin(FontOrigin::Memory(id.to_string()), bytes)
    }

    /// 組み込みのプレースホルダフォント（グリフを持たない）
    pub fn builtin() -> Self {
        Self {
            origin: FontOrigin::Builtin,
            faces: None,
        }
    }

    fn with_origin(origin: FontOrigin, bytes: Vec<u8>) -> Result<Self, FontError> {
        let parse_error = |reason: String| FontError::Parse {
            origin: origin.clone(),
            reason,
        };

        // 壊れたファイルはここで弾く
        let metrics = FontDue::from_bytes(&bytes[..], FontSettings::default())
            .map_err(|e| parse_error(e.to_string()))?;
        let outline = FontArc::try_from_vec(bytes).map_err(|e| parse_error(e.to_string()))?;

        Ok(Self {
            origin,
            faces: Some(Faces {
                metrics: Arc::new(metrics),
                outline,
            }),
        })
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    pub fn is_builtin(&self) -> bool {
        self.faces.is_none()
    }

    /// 指定サイズのフォントハンドルを作る（再パースはしない）
    pub fn load(&self, size: u32) -> Result<FontHandle, FontError> {
        if size == 0 {
            return Err(FontError::InvalidSize(size));
        }

        Ok(FontHandle {
            origin: self.origin.clone(),
            size,
            faces: self.faces.clone(),
        })
    }
}

impl FontProvider for FontSource {
    type Font = FontHandle;
    type Error = FontError;

    fn load(&self, size: u32) -> Result<FontHandle, FontError> {
        FontSource::load(self, size)
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSource")
            .field("origin", &self.origin)
            .field("builtin", &self.is_builtin())
            .finish()
    }
}

/// 特定のサイズに束縛されたフォント
#[derive(Clone)]
pub struct FontHandle {
    origin: FontOrigin,
    size: u32,
    faces: Option<Faces>,
}

impl SizedFont for FontHandle {
    /// ポイントサイズ（1em のピクセル数）
    fn size(&self) -> u32 {
        self.size
    }
}

impl FontHandle {
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    pub fn is_builtin(&self) -> bool {
        self.faces.is_none()
    }

    pub fn metrics_face(&self) -> Option<&FontDue> {
        self.faces.as_ref().map(|faces| faces.metrics.as_ref())
    }

    pub fn outline_face(&self) -> Option<&FontArc> {
        self.faces.as_ref().map(|faces| &faces.outline)
    }

    /// ab_glyph 用のスケール
    ///
    /// ab_glyph の PxScale は ascent - descent の高さなので、
    /// em サイズから換算する。
    pub fn px_scale(&self) -> Option<PxScale> {
        let font = self.outline_face()?;
        let units_per_em = font.units_per_em()?;
        Some(PxScale::from(
            self.size_px() * font.height_unscaled() / units_per_em,
        ))
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("origin", &self.origin)
            .field("size", &self.size)
            .field("builtin", &self.is_builtin())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_source_loads_any_positive_size() {
        let source = FontSource::builtin();
        assert!(source.is_builtin());

        let handle = source.load(32).unwrap();
        assert_eq!(handle.size(), 32);
        assert!(handle.is_builtin());
        assert!(handle.metrics_face().is_none());
        assert!(handle.px_scale().is_none());
        assert_eq!(handle.origin(), &FontOrigin::Builtin);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = FontSource::builtin().load(0).unwrap_err();
        assert!(matches!(err, FontError::InvalidSize(0)));
    }

    #[test]
    fn garbage_bytes_are_rejected_at_load_time() {
        let err = FontSource::from_bytes("junk", b"definitely not a font".to_vec()).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
        assert!(err.to_string().contains("memory:junk"));
    }

    #[test]
    fn handles_share_the_parsed_faces() {
        let Some(path) = crate::platform::font::system_font_families()
            .ranked(crate::engine::text::Script::Latin)
            .into_iter()
            .find(|p| p.is_file())
        else {
            eprintln!("skipping shared face test: no system font found");
            return;
        };
        let Ok(source) = FontSource::from_path(&path) else {
            eprintln!("skipping shared face test: {} did not parse", path.display());
            return;
        };

        let small = source.load(20).unwrap();
        let large = source.load(60).unwrap();
        assert_eq!((small.size(), large.size()), (20, 60));

        let (a, b) = (small.faces.as_ref().unwrap(), large.faces.as_ref().unwrap());
        assert!(Arc::ptr_eq(&a.metrics, &b.metrics));
        assert!(Arc::ptr_eq(
            &source.faces.as_ref().unwrap().metrics,
            &a.metrics
        ));
        assert!(small.px_scale().unwrap().y < large.px_scale().unwrap().y);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = FontSource::from_path("/nonexistent/fonts/NoSuchFont.ttf").unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }
}
