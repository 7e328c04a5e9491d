/// Premultiplied RGBA color in the render target's working space.
///
/// Applications specify colors as packed `0xRRGGBBAA` with straight alpha
/// and sRGB-encoded channels. When the target is an sRGB surface the channels
/// are linearized first, since the hardware re-encodes on write.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Decodes a packed `0xRRGGBBAA` color for a target that is (`linear_target`)
    /// or is not an sRGB surface.
    pub fn from_rgba(rgba: u32, linear_target: bool) -> Self {
        let [r, g, b, a] = rgba.to_be_bytes().map(|c| f32::from(c) / 255.0);
        let (r, g, b) = if linear_target {
            (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
        } else {
            (r, g, b)
        };
        Self { r: r * a, g: g * a, b: b * a, a }
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.r),
            g: f64::from(self.g),
            b: f64::from(self.b),
            a: f64::from(self.a),
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
