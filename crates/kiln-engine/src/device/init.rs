use std::path::PathBuf;

use crate::gfx::ResetFlags;

/// Rendering backend to initialize.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RendererType {
    /// Let wgpu pick the platform default.
    #[default]
    Auto,
    Vulkan,
    Metal,
    Dx12,
    Gl,
}

impl RendererType {
    pub(crate) fn backends(self) -> wgpu::Backends {
        match self {
            RendererType::Auto => wgpu::Backends::all(),
            RendererType::Vulkan => wgpu::Backends::VULKAN,
            RendererType::Metal => wgpu::Backends::METAL,
            RendererType::Dx12 => wgpu::Backends::DX12,
            RendererType::Gl => wgpu::Backends::GL,
        }
    }
}

/// Preferred GPU vendor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum VendorId {
    #[default]
    Any,
    Amd,
    Nvidia,
    Intel,
    /// CPU rasterizer, when the platform provides one.
    Software,
}

impl VendorId {
    /// PCI vendor id, if the preference names a hardware vendor.
    pub fn pci_id(self) -> Option<u32> {
        match self {
            VendorId::Amd => Some(0x1002),
            VendorId::Nvidia => Some(0x10de),
            VendorId::Intel => Some(0x8086),
            VendorId::Any | VendorId::Software => None,
        }
    }

    /// Integrated parts are requested through the low-power preference.
    pub(crate) fn power_preference(self) -> wgpu::PowerPreference {
        match self {
            VendorId::Intel => wgpu::PowerPreference::LowPower,
            _ => wgpu::PowerPreference::HighPerformance,
        }
    }

    pub(crate) fn force_fallback(self) -> bool {
        self == VendorId::Software
    }

    pub(crate) fn matches(self, info: &wgpu::AdapterInfo) -> bool {
        match self {
            VendorId::Any => true,
            VendorId::Software => info.device_type == wgpu::DeviceType::Cpu,
            hw => hw.pci_id() == Some(info.vendor),
        }
    }
}

/// Initial backbuffer size and reset flags.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub reset: ResetFlags,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            reset: ResetFlags::VSYNC,
        }
    }
}

/// Engine initialization parameters.
#[derive(Debug, Clone, Default)]
pub struct Init {
    pub renderer: RendererType,
    pub vendor: VendorId,
    pub resolution: Resolution,
    /// Font for debug text; system fonts are searched when `None`.
    pub debug_font: Option<PathBuf>,
}
