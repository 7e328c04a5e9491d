use bitflags::bitflags;

bitflags! {
    /// Debug overlays drawn by the engine itself.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct DebugFlags: u32 {
        /// Replace the debug text grid with the engine stats page.
        const STATS = 1 << 2;
        /// Draw the debug text grid.
        const TEXT  = 1 << 3;
    }
}

bitflags! {
    /// Backbuffer reset options, applied at init and on `Gfx::reset`.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct ResetFlags: u32 {
        /// Wait for vertical blank when presenting.
        const VSYNC = 1 << 7;
    }
}

bitflags! {
    /// Which attachments a view clears when it is processed.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct ClearFlags: u16 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

bitflags! {
    /// Dynamic buffer creation options.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct BufferFlags: u16 {
        /// Updates past the current end grow the buffer instead of failing.
        const ALLOW_RESIZE = 1 << 8;
        /// Index buffer holds 32-bit indices (16-bit otherwise).
        const INDEX32      = 1 << 10;
    }
}
