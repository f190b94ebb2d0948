//! The per-step message snapshot.

use flock_core::SpatialMessage;

use crate::error::ArenaError;

/// One [`SpatialMessage`] slot per agent, written during emit and
/// frozen before any steering query runs.
///
/// The buffer is either *open* (slots writable, not readable as a
/// snapshot) or *sealed* (read-only). [`seal`](Self::seal) hands out a
/// [`SealedMessages`] view that borrows the buffer, so the compiler
/// rejects any write while a steering pass still holds the view.
#[derive(Clone, Debug, Default)]
pub struct MessageBuffer {
    slots: Vec<SpatialMessage>,
    sealed: bool,
}

impl MessageBuffer {
    /// Create an empty, open buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new step with `len` zeroed slots. Reuses the allocation.
    pub fn reopen(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(len, SpatialMessage::default());
        self.sealed = false;
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the buffer has been sealed for this step.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Write one agent's message.
    pub fn write(&mut self, index: usize, message: SpatialMessage) -> Result<(), ArenaError> {
        let len = self.slots.len();
        let slot = self.slots_mut()?.get_mut(index).ok_or(ArenaError::SlotOutOfRange { index, len })?;
        *slot = message;
        Ok(())
    }

    /// All slots, for a parallel emit pass where each worker writes a
    /// disjoint chunk.
    pub fn slots_mut(&mut self) -> Result<&mut [SpatialMessage], ArenaError> {
        if self.sealed {
            return Err(ArenaError::BufferSealed);
        }
        Ok(&mut self.slots)
    }

    /// Freeze the buffer and return the read-only snapshot.
    ///
    /// Sealing an already sealed buffer is an error: it means two
    /// steering passes ran against one emit.
    pub fn seal(&mut self) -> Result<SealedMessages<'_>, ArenaError> {
        if self.sealed {
            return Err(ArenaError::BufferSealed);
        }
        self.sealed = true;
        Ok(SealedMessages { slots: &self.slots })
    }

    /// Re-borrow the snapshot of a sealed buffer.
    pub fn sealed(&self) -> Result<SealedMessages<'_>, ArenaError> {
        if !self.sealed {
            return Err(ArenaError::BufferNotSealed);
        }
        Ok(SealedMessages { slots: &self.slots })
    }
}

/// Read-only view of a sealed [`MessageBuffer`].
///
/// `Copy` and `Sync`, so one view is shared by every steering worker.
#[derive(Clone, Copy, Debug)]
pub struct SealedMessages<'a> {
    slots: &'a [SpatialMessage],
}

impl<'a> SealedMessages<'a> {
    /// The messages, indexed by agent.
    pub fn as_slice(&self) -> &'a [SpatialMessage] {
        self.slots
    }

    /// Message of agent `index`.
    pub fn get(&self, index: usize) -> Option<&'a SpatialMessage> {
        self.slots.get(index)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::Vec3;

    fn msg(x: f64) -> SpatialMessage {
        SpatialMessage {
            position: Vec3::new(x, 0.0, 0.0),
            velocity: Vec3::ZERO,
        }
    }

    #[test]
    fn write_then_seal_reads_back() {
        let mut buf = MessageBuffer::new();
        buf.reopen(3);
        buf.write(0, msg(1.0)).unwrap();
        buf.write(2, msg(3.0)).unwrap();
        let view = buf.seal().unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(0).unwrap().position.x, 1.0);
        assert_eq!(view.get(1).unwrap().position.x, 0.0);
        assert_eq!(view.get(2).unwrap().position.x, 3.0);
    }

    #[test]
    fn write_after_seal_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(1);
        let _ = buf.seal().unwrap();
        assert_eq!(buf.write(0, msg(1.0)), Err(ArenaError::BufferSealed));
        assert!(matches!(buf.slots_mut(), Err(ArenaError::BufferSealed)));
    }

    #[test]
    fn double_seal_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(1);
        let _ = buf.seal().unwrap();
        assert!(matches!(buf.seal(), Err(ArenaError::BufferSealed)));
    }

    #[test]
    fn read_before_seal_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(2);
        assert!(matches!(buf.sealed(), Err(ArenaError::BufferNotSealed)));
    }

    #[test]
    fn out_of_range_write_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(2);
        assert_eq!(
            buf.write(5, msg(0.0)),
            Err(ArenaError::SlotOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn reopen_clears_previous_step() {
        let mut buf = MessageBuffer::new();
        buf.reopen(2);
        buf.write(1, msg(9.0)).unwrap();
        let _ = buf.seal().unwrap();
        buf.reopen(2);
        assert!(!buf.is_sealed());
        let view = buf.seal().unwrap();
        assert_eq!(view.get(1).unwrap().position.x, 0.0);
    }

    #[test]
    fn empty_buffer_seals() {
        let mut buf = MessageBuffer::new();
        buf.reopen(0);
        let view = buf.seal().unwrap();
        assert!(view.is_empty());
    }
}
