//! Step counter for the park.
//!
//! The clock is the single source of truth for how many steps have run. It
//! advances once at the start of every step with checked arithmetic.

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Step counter would overflow.
    #[error("step counter overflow: cannot advance beyond u64::MAX")]
    StepOverflow,
}

/// Counts completed simulation steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepClock {
    /// Number of the current (or last completed) step; 0 before the first.
    step: u64,
}

impl StepClock {
    /// Create a clock at step 0.
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Create a clock at an arbitrary step (useful for testing).
    pub const fn from_step(step: u64) -> Self {
        Self { step }
    }

    /// Advance by one step and return the new step number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::StepOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub const fn advance(&mut self) -> Result<u64, ClockError> {
        match self.step.checked_add(1) {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(ClockError::StepOverflow),
        }
    }

    /// The current step number.
    pub const fn step(&self) -> u64 {
        self.step
    }
}
