//! GPU device and surface management.
//!
//! Creates the wgpu instance/adapter/device/queue for the configured backend
//! and vendor preference, owns the surface configuration, and hands out one
//! [`GpuFrame`] per rendered frame.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::{Init, RendererType, Resolution, VendorId};
