//! Transmit-channel reset controller.
//!
//! Forces a 2D-DMA transmit channel into a known, inert state whether or not
//! a transfer was in flight:
//!
//! 1. set the abort request,
//! 2. busy-poll the reset-enable condition, at most [`ResetPolicy::max_polls`]
//!    times,
//! 3. commit the channel reset (even if step 2 timed out),
//! 4. clear the abort request.
//!
//! The controller is stateless. It borrows the device for the duration of one
//! call and keeps nothing afterwards. It never retries: a caller that needs a
//! quiescent reset re-invokes it (see [`crate::recovery`]).
//!
//! # Concurrency
//!
//! Synchronous and blocking, no allocation, no lock, no cancellation. The
//! `&mut` device borrow is the only exclusion; callers sharing a device use
//! [`crate::shared::reset_channel_shared`].

use crate::hal::{ChannelId, Dma2dTxHal, MAX_TX_CHANNELS};
use crate::outcome::{ResetAttempt, ResetError, ResetOutcome};
use crate::policy::ResetPolicy;
use crate::sequence::ResetSequence;

/// Stateless reset driver, parameterised only by its [`ResetPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelResetController {
    policy: ResetPolicy,
}

impl ChannelResetController {
    /// Create a controller with the given policy.
    #[must_use]
    pub const fn new(policy: ResetPolicy) -> Self {
        Self { policy }
    }

    /// The policy this controller applies.
    pub const fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Reset one transmit channel.
    ///
    /// `channel` must belong to `hal`; use
    /// [`try_reset_channel`](Self::try_reset_channel) for unchecked indices.
    /// On return the abort request of `channel` is clear, whatever the outcome.
    pub fn reset_channel<H: Dma2dTxHal>(&self, hal: &mut H, channel: ChannelId) -> ResetAttempt {
        let settled = ResetSequence::abort(hal, channel).wait_quiescent(self.policy.max_polls);
        log_wait(channel, settled.outcome());
        settled.commit_reset().clear_abort()
    }

    /// Validate `index` against the device's channel count, then reset it.
    ///
    /// A timeout is still `Ok`: inspect the returned attempt or call
    /// [`ResetAttempt::into_result`].
    ///
    /// # Errors
    ///
    /// [`ResetError::InvalidChannel`] if `index >= hal.tx_channel_count()`.
    /// No hardware primitive is called in that case.
    pub fn try_reset_channel<H: Dma2dTxHal>(
        &self,
        hal: &mut H,
        index: u8,
    ) -> Result<ResetAttempt, ResetError> {
        let channel = ChannelId::try_new(index, hal.tx_channel_count())?;
        Ok(self.reset_channel(hal, channel))
    }

    /// Reset every transmit channel of the device, in index order.
    ///
    /// Each channel runs the full single-channel sequence before the next one
    /// starts. Channels beyond [`MAX_TX_CHANNELS`] are not touched.
    pub fn reset_all<H: Dma2dTxHal>(
        &self,
        hal: &mut H,
    ) -> heapless::Vec<ResetAttempt, MAX_TX_CHANNELS> {
        let mut attempts = heapless::Vec::new();
        for index in 0..hal.tx_channel_count() {
            if attempts.is_full() {
                warn_too_many_channels();
                break;
            }
            let attempt = self.reset_channel(hal, ChannelId::new(index));
            #[cfg(feature = "defmt")]
            defmt::debug!("2D-DMA {} reset: {}", attempt.channel, attempt.outcome);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                channel = attempt.channel.index(),
                polls = attempt.polls(),
                quiescent = attempt.is_quiescent(),
                "2D-DMA channel reset"
            );
            if attempts.push(attempt).is_err() {
                warn_too_many_channels();
                break;
            }
        }
        attempts
    }
}

/// Reset `channel` with [`ResetPolicy::DEFAULT`] (100 polls).
pub fn reset_channel<H: Dma2dTxHal>(hal: &mut H, channel: ChannelId) -> ResetOutcome {
    ChannelResetController::default()
        .reset_channel(hal, channel)
        .outcome
}

fn warn_too_many_channels() {
    #[cfg(feature = "defmt")]
    defmt::warn!("2D-DMA reports more than {=usize} TX channels", MAX_TX_CHANNELS);
    #[cfg(feature = "tracing")]
    tracing::warn!(max = MAX_TX_CHANNELS, "2D-DMA reports too many TX channels");
}

#[allow(unused_variables)]
fn log_wait(channel: ChannelId, outcome: ResetOutcome) {
    match outcome {
        ResetOutcome::Quiescent { polls } => {
            #[cfg(feature = "defmt")]
            defmt::trace!("2D-DMA {} quiescent after {=u16} polls", channel, polls);
            #[cfg(feature = "tracing")]
            tracing::trace!(channel = channel.index(), polls, "2D-DMA channel quiescent");
        }
        ResetOutcome::TimedOut { polls } => {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "2D-DMA {} not quiescent after {=u16} polls, resetting anyway",
                channel,
                polls
            );
            #[cfg(feature = "tracing")]
            tracing::warn!(
                channel = channel.index(),
                polls,
                "2D-DMA channel not quiescent, resetting anyway"
            );
        }
    }
}
