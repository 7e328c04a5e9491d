use std::collections::HashMap;

use crate::text::DebugFont;

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs

/// Placement of a cached glyph, relative to its cell origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct AtlasGlyph {
    pub offset: [f32; 2],
    pub size: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

// ── shelf packer ──────────────────────────────────────────────────────────

/// Row-by-row rectangle packer for a square atlas.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w x h` slot and returns its top-left, or `None` once full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── atlas ─────────────────────────────────────────────────────────────────

/// R8 coverage atlas of debug font glyphs, rasterized on first use and kept
/// for the atlas lifetime.
pub(crate) struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    /// `None` entries remember glyphs with no coverage or no room.
    cache: HashMap<char, Option<AtlasGlyph>>,
    warned_full: bool,
}

impl GlyphAtlas {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            packer: ShelfPacker::new(ATLAS_SIZE),
            cache: HashMap::new(),
            warned_full: false,
        }
    }

    #[inline]
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Looks up `ch`, rasterizing and uploading it on first use.
    pub(crate) fn glyph(
        &mut self,
        queue: &wgpu::Queue,
        font: &DebugFont,
        ch: char,
    ) -> Option<AtlasGlyph> {
        if let Some(cached) = self.cache.get(&ch) {
            return *cached;
        }

        let entry = font.rasterize(ch).and_then(|glyph| {
            let Some((gx, gy)) = self.packer.place(glyph.width, glyph.height) else {
                if !self.warned_full {
                    log::warn!(
                        "glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be drawn"
                    );
                    self.warned_full = true;
                }
                return None;
            };

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &self.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                    aspect: wgpu::TextureAspect::All,
                },
                &glyph.coverage,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(glyph.width),
                    rows_per_image: Some(glyph.height),
                },
                wgpu::Extent3d {
                    width: glyph.width,
                    height: glyph.height,
                    depth_or_array_layers: 1,
                },
            );

            let atlas = ATLAS_SIZE as f32;
            Some(AtlasGlyph {
                offset: [glyph.x, glyph.y],
                size: [glyph.width as f32, glyph.height as f32],
                uv_min: [gx as f32 / atlas, gy as f32 / atlas],
                uv_max: [
                    (gx + glyph.width) as f32 / atlas,
                    (gy + glyph.height) as f32 / atlas,
                ],
            })
        });

        self.cache.insert(ch, entry);
        entry
    }
}
