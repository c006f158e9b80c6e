//! Caller-side tracking of repeated reset timeouts.
//!
//! The reset controller never retries and never escalates. A driver that
//! needs a quiescent channel feeds every [`ResetAttempt`] into a
//! [`ChannelRecoveryState`] and decides from it when to re-invoke the reset
//! or give up on the channel (e.g. power-cycle the 2D-DMA block).
//!
//! ```rust
//! # #[cfg(feature = "std")] {
//! use dma2d::mocks::{MockDma2d, Readiness};
//! use dma2d::recovery::ChannelRecoveryState;
//! use dma2d::{ChannelId, ChannelResetController};
//!
//! let mut hal = MockDma2d::new();
//! let ch = ChannelId::new(0);
//! hal.set_readiness(ch, Readiness::Never);
//!
//! let controller = ChannelResetController::default();
//! let mut recovery = ChannelRecoveryState::new();
//! while !recovery.needs_escalation(3) {
//!     let attempt = controller.reset_channel(&mut hal, ch);
//!     recovery.on_attempt(&attempt);
//!     if attempt.is_quiescent() {
//!         break;
//!     }
//! }
//! assert_eq!(recovery.consecutive_timeouts(), 3);
//! # }
//! ```

use crate::outcome::ResetAttempt;

/// Per-channel reset health.
///
/// `consecutive_timeouts` saturates at [`u8::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelRecoveryState {
    /// Last reset observed quiescence (or no reset yet).
    Healthy,
    /// One or more resets in a row timed out.
    Degraded {
        /// Timed-out resets since the last quiescent one.
        consecutive_timeouts: u8,
    },
}

impl ChannelRecoveryState {
    /// Create a tracker in the [`Healthy`][Self::Healthy] state.
    pub fn new() -> Self {
        Self::Healthy
    }

    /// Update after every reset of the tracked channel.
    ///
    /// - quiescent attempt: back to `Healthy`.
    /// - timed-out attempt: `Degraded`, counter incremented (saturating).
    pub fn on_attempt(&mut self, attempt: &ResetAttempt) {
        if attempt.is_quiescent() {
            *self = Self::Healthy;
        } else {
            *self = Self::Degraded {
                consecutive_timeouts: match self {
                    Self::Degraded {
                        consecutive_timeouts,
                    } => consecutive_timeouts.saturating_add(1),
                    Self::Healthy => 1,
                },
            };
        }
    }

    /// Timed-out resets since the last quiescent one.
    pub fn consecutive_timeouts(&self) -> u8 {
        match self {
            Self::Degraded {
                consecutive_timeouts,
            } => *consecutive_timeouts,
            Self::Healthy => 0,
        }
    }

    /// Returns `true` once `threshold` resets in a row have timed out.
    ///
    /// A threshold of 0 is treated as 1.
    pub fn needs_escalation(&self, threshold: u8) -> bool {
        self.consecutive_timeouts() >= threshold.max(1)
    }
}

impl Default for ChannelRecoveryState {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
