use super::{BufferFlags, GfxError};

/// Smallest GPU allocation for a dynamic buffer, in bytes.
const MIN_BUFFER_BYTES: u64 = 256;

/// Size bookkeeping for one dynamic buffer, independent of the GPU object.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct DynamicBufferInfo {
    /// Allocated size in bytes.
    pub size: u64,
    /// Bytes per element (vertex stride or index size).
    pub stride: u64,
    pub flags: BufferFlags,
}

/// What a single update needs from the GPU side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct UpdatePlan {
    /// Byte offset of the write.
    pub offset: u64,
    /// Bytes written, padded to the copy alignment.
    pub len: u64,
    /// New allocation size when the write does not fit.
    pub grow_to: Option<u64>,
}

impl DynamicBufferInfo {
    pub(crate) fn new(num_elements: u32, stride: u64, flags: BufferFlags) -> Self {
        Self {
            size: align4(u64::from(num_elements) * stride).max(MIN_BUFFER_BYTES),
            stride,
            flags,
        }
    }

    /// Plans writing `data_len` bytes starting at element `start`.
    pub(crate) fn plan_update(&self, start: u32, data_len: usize) -> Result<UpdatePlan, GfxError> {
        let offset = u64::from(start) * self.stride;
        if offset % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
            return Err(GfxError::Misaligned(offset));
        }

        let len = align4(data_len as u64);
        let end = offset + len;
        if end <= self.size {
            return Ok(UpdatePlan { offset, len, grow_to: None });
        }

        if !self.flags.contains(BufferFlags::ALLOW_RESIZE) {
            return Err(GfxError::BufferOverflow {
                offset,
                len: data_len as u64,
                size: self.size,
            });
        }

        Ok(UpdatePlan {
            offset,
            len,
            grow_to: Some(end.next_power_of_two().max(MIN_BUFFER_BYTES)),
        })
    }

}

impl UpdatePlan {
    /// Bytes copied from the old allocation when the plan grows the buffer:
    /// everything before the write offset that the old buffer held.
    #[inline]
    pub(crate) fn preserved_bytes(&self, old_size: u64) -> u64 {
        match self.grow_to {
            Some(_) => self.offset.min(old_size),
            None => 0,
        }
    }
}

#[inline]
fn align4(n: u64) -> u64 {
    let a = wgpu::COPY_BUFFER_ALIGNMENT;
    n.div_ceil(a) * a
}
