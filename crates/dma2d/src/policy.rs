//! Reset policy configuration.
//!
//! The only tunable is the quiescence poll bound. It is an iteration count,
//! not a wall-clock timeout: elapsed time depends on how long one
//! `tx_is_reset_avail` read takes on the bus.

use crate::hal::OutOfRangeError;

/// Default number of readiness polls before a reset is reported as timed out.
///
/// Matches the vendor driver patch this controller replaces. The figure is not
/// derived from 2D-DMA timing data.
pub const DEFAULT_MAX_POLLS: u16 = 100;

/// Number of readiness polls a reset may spend, never zero.
///
/// Wraps a `u16` with the invariant `value >= 1`: every reset polls the
/// hardware at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PollBudget(u16);

impl PollBudget {
    /// The default budget of [`DEFAULT_MAX_POLLS`].
    pub const DEFAULT: Self = Self(DEFAULT_MAX_POLLS);

    /// Create a `PollBudget`, clamping 0 up to 1.
    #[must_use]
    pub const fn new(polls: u16) -> Self {
        if polls == 0 {
            Self(1)
        } else {
            Self(polls)
        }
    }

    /// Create a `PollBudget`, returning an error if `polls == 0`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `polls` is zero.
    pub fn try_new(polls: u16) -> Result<Self, OutOfRangeError> {
        if polls == 0 {
            Err(OutOfRangeError {
                value: 0,
                min: 1,
                max: u32::from(u16::MAX),
            })
        } else {
            Ok(Self(polls))
        }
    }

    /// Return the poll count.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for [`ChannelResetController`](crate::ChannelResetController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetPolicy {
    /// Readiness polls allowed between abort and reset commit.
    pub max_polls: PollBudget,
}

impl ResetPolicy {
    /// Policy with [`DEFAULT_MAX_POLLS`].
    pub const DEFAULT: Self = Self {
        max_polls: PollBudget::DEFAULT,
    };

    /// Policy with a custom poll bound.
    #[must_use]
    pub const fn with_max_polls(max_polls: PollBudget) -> Self {
        Self { max_polls }
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
