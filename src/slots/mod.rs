//! Preset slot storage boundary.
//!
//! The instrument persists presets in numbered slots (`.dlp` files when
//! exported); the byte layout belongs to the librarian. This crate only
//! needs to read a slot into a [`FormantVector`] and write one back, so
//! the boundary is a small trait with an in-memory implementation for
//! tests and the demo binary.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::formant::FormantVector;

pub type SlotId = u16;

pub trait SlotStore {
    fn read_slot(&mut self, id: SlotId) -> Result<FormantVector>;
    fn write_slot(&mut self, id: SlotId, vector: &FormantVector) -> Result<()>;

    /// Copy one slot to another, as the companion's slot-copy tool does.
    fn copy_slot(&mut self, src: SlotId, dst: SlotId) -> Result<()> {
        let vector = self.read_slot(src)?;
        self.write_slot(dst, &vector)
    }
}

/// Slot store backed by a map. Reads of never-written slots fail the same
/// way an empty hardware slot does.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: HashMap<SlotId, FormantVector>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&mut self, id: SlotId) -> Result<FormantVector> {
        self.slots.get(&id).copied().ok_or(Error::EmptySlot(id))
    }

    fn write_slot(&mut self, id: SlotId, vector: &FormantVector) -> Result<()> {
        self.slots.insert(id, *vector);
        Ok(())
    }
}
