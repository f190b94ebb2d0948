//! Double-buffered population store.
//!
//! [`PopulationArena`] keeps two agent buffers that alternate between
//! "published" (the committed population, readable between steps) and
//! "staging" (written during a step). [`PopulationArena::publish`]
//! swaps the roles, so observers only ever see whole steps.

use flock_core::{Agent, TickId};

use crate::error::ArenaError;
use crate::message::MessageBuffer;

/// Borrows handed out for the duration of one step.
///
/// Created by [`PopulationArena::begin_step()`]. The three fields are
/// disjoint borrows, so the steering pass can hold a sealed view of
/// `messages` and read `current` while writing `staging`.
#[must_use]
#[derive(Debug)]
pub struct StepGuard<'a> {
    /// The population as of the last publish. Source of the step's messages.
    pub current: &'a [Agent],
    /// Copy of `current` that the step overwrites with next-step state.
    pub staging: &'a mut [Agent],
    /// Reopened message buffer, one slot per agent.
    pub messages: &'a mut MessageBuffer,
}

/// Ping-pong agent buffers plus the per-step message buffer.
///
/// ```text
/// buffer_a: Vec<Agent>  ←─── staging when b_is_staging == false
/// buffer_b: Vec<Agent>  ←─── staging when b_is_staging == true
/// messages: MessageBuffer ←── reopened by every begin_step()
/// ```
#[derive(Debug)]
pub struct PopulationArena {
    buffer_a: Vec<Agent>,
    buffer_b: Vec<Agent>,
    messages: MessageBuffer,
    /// Which buffer is currently staging (false = A staging, true = B staging).
    b_is_staging: bool,
    /// `begin_step()` called, `publish()` not yet called.
    step_in_progress: bool,
    last_tick: TickId,
}

impl PopulationArena {
    /// Create an arena whose published buffer holds `agents`.
    ///
    /// Force accumulators are zeroed on entry.
    pub fn new(agents: Vec<Agent>) -> Self {
        let mut arena = Self {
            buffer_a: Vec::new(),
            buffer_b: Vec::new(),
            messages: MessageBuffer::new(),
            b_is_staging: false,
            step_in_progress: false,
            last_tick: TickId(0),
        };
        arena.reset(agents);
        arena
    }

    /// Replace the population and return to tick 0.
    pub fn reset(&mut self, mut agents: Vec<Agent>) {
        for a in &mut agents {
            a.force = flock_core::Vec3::ZERO;
        }
        self.buffer_a = Vec::with_capacity(agents.len());
        // B starts as published.
        self.buffer_b = agents;
        self.b_is_staging = false;
        self.step_in_progress = false;
        self.messages.reopen(0);
        self.last_tick = TickId(0);
    }

    /// The committed population.
    pub fn published(&self) -> &[Agent] {
        if self.b_is_staging {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.published().len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.published().is_empty()
    }

    /// The message buffer. Sealed between a completed step and the next
    /// `begin_step()`.
    pub fn messages(&self) -> &MessageBuffer {
        &self.messages
    }

    /// Tick of the last successful publish (`TickId(0)` before the first).
    pub fn last_tick(&self) -> TickId {
        self.last_tick
    }

    /// Start a step: copy the published population into staging and
    /// reopen the message buffer.
    ///
    /// Calling this again without publishing abandons the earlier step.
    pub fn begin_step(&mut self) -> StepGuard<'_> {
        self.step_in_progress = true;
        let (published, staging) = if self.b_is_staging {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        };
        staging.clear();
        staging.extend_from_slice(published);
        self.messages.reopen(published.len());
        StepGuard {
            current: published,
            staging,
            messages: &mut self.messages,
        }
    }

    /// Commit the staging buffer as the new published population.
    pub fn publish(&mut self, tick: TickId) -> Result<(), ArenaError> {
        if !self.step_in_progress {
            return Err(ArenaError::NoStepInProgress);
        }
        self.step_in_progress = false;
        self.b_is_staging = !self.b_is_staging;
        self.last_tick = tick;
        Ok(())
    }
}
