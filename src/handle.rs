// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::BridgeError;
use crate::image::Image;
use tracing::debug;

/// Opaque, non-zero identifier for a registered [`Image`].
///
/// A handle packs a slot index and a generation counter into a `u64`:
/// the low 32 bits address the slot, the high 32 bits carry the generation
/// the slot had when the handle was issued. Generations start at 1, so a
/// valid handle is never numerically zero and zero remains free to act as
/// the failure sentinel at the foreign boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Raw numeric form, as passed across the foreign boundary.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Reconstructs a handle from its raw form. Zero is the failure
    /// sentinel and never names a buffer.
    pub const fn from_raw(raw: u64) -> Option<Handle> {
        if raw == 0 {
            None
        } else {
            Some(Handle(raw))
        }
    }

    fn new(index: u32, generation: u32) -> Handle {
        Handle((generation as u64) << 32 | index as u64)
    }

    fn index(self) -> u32 {
        self.0 as u32
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

struct Slot {
    generation: u32,
    image: Option<Image>,
}

/// Generation-checked arena of registered image buffers.
///
/// The table never hands out raw addresses: a [`Handle`] is only valid
/// while the slot it points at still carries the generation it was issued
/// with. Releasing a buffer bumps the slot's generation, so stale handles
/// are rejected with [`BridgeError::StaleHandle`] instead of reaching a
/// recycled buffer.
#[derive(Default)]
pub struct HandleTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a buffer and returns its handle. Ownership moves into the
    /// table until [`HandleTable::remove`] is called.
    pub fn insert(&mut self, image: Image) -> Handle {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.image = Some(image);
                Handle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 1,
                    image: Some(image),
                });
                Handle::new(index, 1)
            }
        };
        debug!("image registered as handle {:#x}", handle.raw());
        handle
    }

    /// Looks up the buffer a handle refers to.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::StaleHandle`] if the handle was never issued
    /// or its buffer has been released.
    pub fn get(&self, handle: Handle) -> Result<&Image, BridgeError> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.image.as_ref())
            .ok_or(BridgeError::StaleHandle(handle.raw()))
    }

    /// Releases a buffer, returning ownership to the caller and
    /// invalidating the handle.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::StaleHandle`] if the handle is unknown or was
    /// already released, so double-release is detected rather than freeing
    /// a recycled slot.
    pub fn remove(&mut self, handle: Handle) -> Result<Image, BridgeError> {
        let slot = self
            .slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .ok_or(BridgeError::StaleHandle(handle.raw()))?;

        let image = slot
            .image
            .take()
            .ok_or(BridgeError::StaleHandle(handle.raw()))?;

        // Bump the generation so the released handle can never resolve
        // again, skipping zero on wrap so handles stay non-zero.
        slot.generation = match slot.generation.wrapping_add(1) {
            0 => 1,
            next => next,
        };
        self.free.push(handle.index());
        debug!("image handle {:#x} released", handle.raw());
        Ok(image)
    }

    /// Number of live buffers in the table.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
