//! Transmit-channel reset typestate machine.
//!
//! ```text
//! [Idle/Active] --abort()--> [Aborting] --wait_quiescent()--> [Settled]
//!                                                               |
//!               [AbortCleared] <--clear_abort()-- [Resetting] <--commit_reset()
//! ```
//!
//! `Settled` covers both the quiescent and the timed-out fork. The fork only
//! changes the reported [`ResetOutcome`]: the next transition is the same.
//!
//! The sequence holds the `&mut` device borrow for its whole lifetime, so no
//! other code can start a transfer on the device between abort and
//! abort-clear. Only the controller constructs sequences, and it always runs
//! them to [`ResetSequence::clear_abort`].

use crate::hal::{ChannelId, Dma2dTxHal};
use crate::outcome::{ResetAttempt, ResetOutcome};
use crate::policy::PollBudget;

// ── State types ──────────────────────────────────────────────────────────────

/// Abort request set; in-flight transfer may still be draining.
pub(crate) struct Aborting;

/// Quiescence wait finished (either way).
pub(crate) struct Settled(ResetOutcome);

/// Reset committed; abort request still set.
pub(crate) struct Resetting(ResetOutcome);

// ── Sequencer ────────────────────────────────────────────────────────────────

/// One reset of one channel, in state `State`.
pub(crate) struct ResetSequence<'a, H: Dma2dTxHal, State> {
    hal: &'a mut H,
    channel: ChannelId,
    state: State,
}

impl<'a, H: Dma2dTxHal> ResetSequence<'a, H, Aborting> {
    /// Request abort of any transfer in flight on `channel`.
    ///
    /// A no-op on the hardware side if the channel was idle.
    #[must_use]
    pub(crate) fn abort(hal: &'a mut H, channel: ChannelId) -> Self {
        hal.tx_abort(channel, true);
        Self {
            hal,
            channel,
            state: Aborting,
        }
    }

    /// Busy-poll the reset-enable condition, at most `budget` times.
    ///
    /// No delay between polls. Stops at the first poll that reports ready.
    #[must_use]
    pub(crate) fn wait_quiescent(self, budget: PollBudget) -> ResetSequence<'a, H, Settled> {
        let max = budget.get();
        let mut outcome = ResetOutcome::TimedOut { polls: max };
        for poll in 1..=max {
            if self.hal.tx_is_reset_avail(self.channel) {
                outcome = ResetOutcome::Quiescent { polls: poll };
                break;
            }
        }
        ResetSequence {
            hal: self.hal,
            channel: self.channel,
            state: Settled(outcome),
        }
    }
}

impl<'a, H: Dma2dTxHal> ResetSequence<'a, H, Settled> {
    /// Outcome of the quiescence wait.
    pub(crate) fn outcome(&self) -> ResetOutcome {
        self.state.0
    }

    /// Commit the register reset, regardless of the wait outcome.
    #[must_use]
    pub(crate) fn commit_reset(self) -> ResetSequence<'a, H, Resetting> {
        self.hal.tx_reset_channel(self.channel);
        ResetSequence {
            hal: self.hal,
            channel: self.channel,
            state: Resetting(self.state.0),
        }
    }
}

impl<H: Dma2dTxHal> ResetSequence<'_, H, Resetting> {
    /// Clear the abort request and release the device borrow.
    ///
    /// Terminal transition: the channel accepts new transfers again.
    pub(crate) fn clear_abort(self) -> ResetAttempt {
        self.hal.tx_abort(self.channel, false);
        ResetAttempt {
            channel: self.channel,
            outcome: self.state.0,
        }
    }
}
