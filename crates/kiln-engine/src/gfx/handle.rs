use super::GfxError;

/// Index of a view. Valid ids are `0..MAX_VIEWS`.
pub type ViewId = u16;

/// Number of addressable views.
pub const MAX_VIEWS: usize = 256;

/// Opaque handle to a dynamic vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DynamicVertexBufferHandle(u16);

/// Opaque handle to a dynamic index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DynamicIndexBufferHandle(u16);

macro_rules! raw_handle {
    ($ty:ident) => {
        impl $ty {
            /// Wraps a raw slot index. Intended for alternative `Gfx`
            /// implementations that manage their own tables.
            #[inline]
            pub const fn from_raw(index: u16) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn raw(self) -> u16 {
                self.0
            }
        }
    };
}

raw_handle!(DynamicVertexBufferHandle);
raw_handle!(DynamicIndexBufferHandle);

/// Slot table with a free list; freed slots are reused lowest-first.
#[derive(Debug)]
pub(crate) struct HandleTable<T> {
    kind: &'static str,
    limit: usize,
    slots: Vec<Option<T>>,
    free: Vec<u16>,
}

impl<T> HandleTable<T> {
    pub(crate) fn new(kind: &'static str, limit: usize) -> Self {
        debug_assert!(limit <= u16::MAX as usize + 1);
        Self {
            kind,
            limit,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> Result<u16, GfxError> {
        if let Some(index) = self.pop_lowest_free() {
            self.slots[index as usize] = Some(value);
            return Ok(index);
        }
        if self.slots.len() >= self.limit {
            return Err(GfxError::HandlesExhausted {
                kind: self.kind,
                limit: self.limit,
            });
        }
        self.slots.push(Some(value));
        Ok((self.slots.len() - 1) as u16)
    }

    pub(crate) fn get_mut(&mut self, index: u16) -> Result<&mut T, GfxError> {
        let kind = self.kind;
        self.slots
            .get_mut(index as usize)
            .and_then(Option::as_mut)
            .ok_or(GfxError::InvalidHandle { kind, index })
    }

    pub(crate) fn remove(&mut self, index: u16) -> Result<T, GfxError> {
        let value = self
            .slots
            .get_mut(index as usize)
            .and_then(Option::take)
            .ok_or(GfxError::InvalidHandle {
                kind: self.kind,
                index,
            })?;
        self.free.push(index);
        Ok(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    fn pop_lowest_free(&mut self) -> Option<u16> {
        let (pos, _) = self.free.iter().enumerate().min_by_key(|&(_, idx)| *idx)?;
        Some(self.free.swap_remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_hands_out_sequential_slots() {
        let mut table = HandleTable::new("test", 8);
        assert_eq!(table.insert('a').unwrap(), 0);
        assert_eq!(table.insert('b').unwrap(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn removed_slots_are_reused_lowest_first() {
        let mut table = HandleTable::new("test", 8);
        for c in ['a', 'b', 'c', 'd'] {
            table.insert(c).unwrap();
        }
        table.remove(3).unwrap();
        table.remove(1).unwrap();
        assert_eq!(table.insert('x').unwrap(), 1);
        assert_eq!(table.insert('y').unwrap(), 3);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut table = HandleTable::new("vertex buffer", 8);
        let idx = table.insert(1u32).unwrap();
        table.remove(idx).unwrap();
        assert!(matches!(
            table.get_mut(idx),
            Err(GfxError::InvalidHandle { kind: "vertex buffer", index: 0 })
        ));
        assert!(table.remove(idx).is_err());
    }

    #[test]
    fn limit_is_enforced() {
        let mut table = HandleTable::new("test", 2);
        table.insert(()).unwrap();
        table.insert(()).unwrap();
        assert!(matches!(
            table.insert(()),
            Err(GfxError::HandlesExhausted { limit: 2, .. })
        ));
    }
}
