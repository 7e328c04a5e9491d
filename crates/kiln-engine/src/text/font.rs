use std::path::{Path, PathBuf};

use crate::gfx::CELL_HEIGHT;

/// Pixel size glyphs are rasterized at; fits inside one 16-pixel cell.
const FONT_PX: f32 = 13.0;

/// System paths tried in order when no explicit font is configured.
/// Monospace faces first so glyphs line up with the cell grid.
const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

#[derive(Debug, thiserror::Error)]
pub(crate) enum FontError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {path}: {reason}")]
    Parse { path: PathBuf, reason: &'static str },

    #[error("no usable font found in {tried} candidate locations")]
    NotFound { tried: usize },
}

/// Rasterized glyph with bitmap placement relative to its cell.
pub(crate) struct Glyph {
    /// Left edge offset from the cell origin.
    pub x: f32,
    /// Top edge offset from the cell origin.
    pub y: f32,
    pub width: u32,
    pub height: u32,
    /// One coverage byte per pixel, row-major.
    pub coverage: Vec<u8>,
}

/// Font used for the debug text grid and overlay labels.
pub(crate) struct DebugFont {
    font: fontdue::Font,
    path: PathBuf,
    /// Baseline offset from the top of a cell.
    baseline: f32,
}

impl DebugFont {
    /// Loads the configured font, or the first discoverable system font.
    ///
    /// An explicit path that fails to load falls back to discovery.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, FontError> {
        if let Some(path) = explicit {
            match Self::from_path(path) {
                Ok(font) => return Ok(font),
                Err(e) => log::warn!("{e}; searching system fonts"),
            }
        }

        candidate_paths()
            .find_map(|path| Self::from_path(path).ok())
            .ok_or(FontError::NotFound {
                tried: CANDIDATES.len(),
            })
    }

    fn from_path(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, path)
    }

    fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |reason| FontError::Parse {
                path: path.to_path_buf(),
                reason,
            },
        )?;

        let (ascent, descent) = font
            .horizontal_line_metrics(FONT_PX)
            .map_or((FONT_PX * 0.8, -FONT_PX * 0.2), |m| (m.ascent, m.descent));
        let baseline = cell_baseline(ascent, descent);

        Ok(Self {
            font,
            path: path.to_path_buf(),
            baseline,
        })
    }

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Rasterizes `ch`. Returns `None` for glyphs with no coverage (spaces).
    pub(crate) fn rasterize(&self, ch: char) -> Option<Glyph> {
        let (metrics, coverage) = self.font.rasterize(ch, FONT_PX);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        Some(Glyph {
            x: metrics.xmin as f32,
            y: (self.baseline - (metrics.height as i32 + metrics.ymin) as f32).round(),
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
        })
    }
}

/// Baseline that vertically centres the font's line box in a cell.
fn cell_baseline(ascent: f32, descent: f32) -> f32 {
    let line = ascent - descent;
    ((CELL_HEIGHT as f32 - line) * 0.5 + ascent).round()
}

fn candidate_paths() -> impl Iterator<Item = &'static Path> {
    CANDIDATES.iter().map(Path::new)
}
