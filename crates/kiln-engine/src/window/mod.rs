//! Platform runtime: one winit window driving an [`crate::core::App`].

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
