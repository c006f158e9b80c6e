//! Reset results and errors.
//!
//! A reset never fails in the `Result` sense: it always commits the reset and
//! clears the abort flag. Whether the channel went quiet first is reported
//! through [`ResetOutcome`]. [`ResetAttempt::into_result`] converts a timeout
//! into [`ResetError::Timeout`] for callers that prefer `?`.

use core::fmt;

use crate::hal::{ChannelId, OutOfRangeError};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// How the quiescence wait of one reset ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetOutcome {
    /// The reset-enable condition held on poll number `polls` (1-based).
    Quiescent {
        /// Polls spent, including the successful one.
        polls: u16,
    },
    /// The poll bound was exhausted. The reset was still committed.
    TimedOut {
        /// Polls spent, equal to the configured bound.
        polls: u16,
    },
}

impl ResetOutcome {
    /// Readiness polls consumed by the attempt.
    pub const fn polls(self) -> u16 {
        match self {
            Self::Quiescent { polls } | Self::TimedOut { polls } => polls,
        }
    }

    /// Returns `true` if quiescence was not observed within the bound.
    pub const fn is_timeout(self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

// ─── Attempt ─────────────────────────────────────────────────────────────────

/// Record of a single completed reset call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetAttempt {
    /// Channel that was reset.
    pub channel: ChannelId,
    /// Result of the quiescence wait.
    pub outcome: ResetOutcome,
}

impl ResetAttempt {
    /// Readiness polls consumed.
    pub const fn polls(&self) -> u16 {
        self.outcome.polls()
    }

    /// Returns `true` if the channel reached quiescence before the reset.
    pub const fn is_quiescent(&self) -> bool {
        !self.outcome.is_timeout()
    }

    /// Convert a timed-out attempt into [`ResetError::Timeout`].
    ///
    /// On success returns the number of polls spent.
    pub fn into_result(self) -> Result<u16, ResetError> {
        match self.outcome {
            ResetOutcome::Quiescent { polls } => Ok(polls),
            ResetOutcome::TimedOut { polls } => Err(ResetError::Timeout {
                channel: self.channel,
                polls,
            }),
        }
    }
}

// ─── Error type ──────────────────────────────────────────────────────────────

/// Reset controller errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetError {
    /// Quiescence was not observed within the poll bound.
    ///
    /// The reset was committed and the abort flag cleared regardless.
    Timeout {
        /// Channel that timed out.
        channel: ChannelId,
        /// Polls spent.
        polls: u16,
    },
    /// Channel index is not a transmit channel of the device.
    /// No hardware call was issued.
    InvalidChannel(OutOfRangeError),
    /// The shared device handle was already borrowed.
    DeviceBusy,
}

impl From<OutOfRangeError> for ResetError {
    fn from(err: OutOfRangeError) -> Self {
        Self::InvalidChannel(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResetError {}

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { channel, polls } => {
                write!(f, "DMA channel {channel} not quiescent after {polls} polls")
            }
            Self::InvalidChannel(err) => write!(f, "Invalid DMA channel: {err}"),
            Self::DeviceBusy => write!(f, "DMA device is busy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiescent_attempt_converts_to_poll_count() {
        let attempt = ResetAttempt {
            channel: ChannelId::new(1),
            outcome: ResetOutcome::Quiescent { polls: 4 },
        };
        assert!(attempt.is_quiescent());
        assert_eq!(attempt.into_result(), Ok(4));
    }

    #[test]
    fn timed_out_attempt_converts_to_timeout_error() {
        let attempt = ResetAttempt {
            channel: ChannelId::new(2),
            outcome: ResetOutcome::TimedOut { polls: 100 },
        };
        assert!(!attempt.is_quiescent());
        assert_eq!(attempt.polls(), 100);
        assert_eq!(
            attempt.into_result(),
            Err(ResetError::Timeout {
                channel: ChannelId::new(2),
                polls: 100
            })
        );
    }

    #[test]
    fn out_of_range_converts_to_invalid_channel() {
        let err = OutOfRangeError {
            value: 5,
            min: 0,
            max: 2,
        };
        assert_eq!(ResetError::from(err), ResetError::InvalidChannel(err));
    }
}
