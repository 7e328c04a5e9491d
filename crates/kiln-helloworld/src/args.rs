//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use kiln_engine::device::{Init, RendererType, Resolution, VendorId};
use kiln_engine::gfx::ResetFlags;

/// Rendering backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliBackend {
    /// Platform default.
    #[default]
    Auto,
    Vulkan,
    Metal,
    Dx12,
    /// OpenGL / GLES.
    Gl,
}

impl From<CliBackend> for RendererType {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Auto => RendererType::Auto,
            CliBackend::Vulkan => RendererType::Vulkan,
            CliBackend::Metal => RendererType::Metal,
            CliBackend::Dx12 => RendererType::Dx12,
            CliBackend::Gl => RendererType::Gl,
        }
    }
}

/// GPU vendor preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliVendor {
    #[default]
    Any,
    Amd,
    Nvidia,
    Intel,
    /// CPU rasterizer.
    Software,
}

impl From<CliVendor> for VendorId {
    fn from(cli: CliVendor) -> Self {
        match cli {
            CliVendor::Any => VendorId::Any,
            CliVendor::Amd => VendorId::Amd,
            CliVendor::Nvidia => VendorId::Nvidia,
            CliVendor::Intel => VendorId::Intel,
            CliVendor::Software => VendorId::Software,
        }
    }
}

/// Initialization, dynamic vertex/index buffers and debug text.
///
/// F1 toggles the stats page, F7 toggles vsync, Esc quits.
#[derive(Parser, Debug)]
#[command(name = "kiln-helloworld", version)]
pub struct Args {
    /// Rendering backend.
    #[arg(long, value_enum, default_value_t = CliBackend::Auto)]
    pub backend: CliBackend,

    /// Preferred GPU vendor.
    #[arg(long, value_enum, default_value_t = CliVendor::Any)]
    pub vendor: CliVendor,

    /// Backbuffer width in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Backbuffer height in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Present without waiting for vertical blank.
    #[arg(long)]
    pub no_vsync: bool,

    /// TrueType font for debug text (system fonts are searched otherwise).
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Exit after this many frames.
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Log filter in env_logger syntax, e.g. "debug" or "kiln_engine=trace".
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    pub fn init(&self) -> Init {
        let reset = if self.no_vsync {
            ResetFlags::empty()
        } else {
            ResetFlags::VSYNC
        };

        Init {
            renderer: self.backend.into(),
            vendor: self.vendor.into(),
            resolution: Resolution {
                width: self.width,
                height: self.height,
                reset,
            },
            debug_font: self.font.clone(),
        }
    }
}
