/// Device/queue plus target description for renderers.
pub(crate) struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Target size in physical pixels.
    pub width: u32,
    pub height: u32,
}

/// Encoder and color attachment for one pass.
pub(crate) struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
