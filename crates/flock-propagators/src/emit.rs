//! Emit phase: every agent broadcasts its position and velocity.

use flock_arena::{ArenaError, MessageBuffer};
use flock_core::Agent;

use crate::executor::Executor;

/// Copies each agent's position and velocity into its message slot.
///
/// Slot `i` receives agent `i`'s state unchanged. The agent's own
/// message is included; steering skips it by its zero distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Emit;

impl Emit {
    /// Kernel name for logs.
    pub fn name(&self) -> &str {
        "emit"
    }

    /// Fill the open `buffer` from `agents`.
    ///
    /// # Errors
    ///
    /// [`ArenaError::BufferSealed`] if the buffer was already sealed this
    /// step; [`ArenaError::LengthMismatch`] if its length differs from
    /// the population.
    pub fn run(
        &self,
        executor: &Executor,
        agents: &[Agent],
        buffer: &mut MessageBuffer,
    ) -> Result<(), ArenaError> {
        let slots = buffer.slots_mut()?;
        if slots.len() != agents.len() {
            return Err(ArenaError::LengthMismatch {
                expected: agents.len(),
                actual: slots.len(),
            });
        }
        executor.for_each_mut(slots, |i, slot| *slot = agents[i].message());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::Vec3;

    #[test]
    fn copies_state_unchanged() {
        let agents = vec![
            Agent::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.0, -0.5)),
            Agent::new(Vec3::splat(-7.0), Vec3::ZERO),
        ];
        let mut buf = MessageBuffer::new();
        buf.reopen(2);
        Emit.run(&Executor::Serial, &agents, &mut buf).unwrap();
        let view = buf.seal().unwrap();
        for (a, m) in agents.iter().zip(view.as_slice()) {
            assert_eq!(m.position, a.position);
            assert_eq!(m.velocity, a.velocity);
        }
    }

    #[test]
    fn sealed_buffer_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(0);
        let _ = buf.seal().unwrap();
        assert_eq!(
            Emit.run(&Executor::Serial, &[], &mut buf),
            Err(ArenaError::BufferSealed)
        );
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut buf = MessageBuffer::new();
        buf.reopen(1);
        let agents = vec![Agent::default(); 3];
        assert_eq!(
            Emit.run(&Executor::Serial, &agents, &mut buf),
            Err(ArenaError::LengthMismatch { expected: 3, actual: 1 })
        );
    }
}
