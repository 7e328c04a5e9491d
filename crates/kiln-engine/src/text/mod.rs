//! CPU-side font access for the debug text and overlay glyphs.

mod font;

pub(crate) use font::DebugFont;
