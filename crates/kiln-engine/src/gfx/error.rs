use super::handle::ViewId;

/// Errors reported by the rendering interface.
///
/// Everything except `Surface` is a usage error on the caller's side. None of
/// them are retried by the engine.
#[derive(Debug, thiserror::Error)]
pub enum GfxError {
    #[error("invalid {kind} handle {index}")]
    InvalidHandle { kind: &'static str, index: u16 },

    #[error("view {0} is out of range")]
    InvalidView(ViewId),

    #[error("invalid vertex layout: {0}")]
    InvalidLayout(String),

    #[error("out of {kind} handles (limit {limit})")]
    HandlesExhausted { kind: &'static str, limit: usize },

    #[error("writing {len} bytes at offset {offset} overflows a {size}-byte buffer created without ALLOW_RESIZE")]
    BufferOverflow { offset: u64, len: u64, size: u64 },

    #[error("buffer update offset {0} is not 4-byte aligned")]
    Misaligned(u64),

    #[error("surface failure: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
