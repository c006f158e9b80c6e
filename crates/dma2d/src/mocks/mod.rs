//! Mock implementations for testing
//!
//! [`MockDma2d`] implements [`Dma2dTxHal`] without hardware. It records every
//! primitive call in order and answers readiness polls from a per-channel
//! script, so tests can assert exact call counts and ordering.
//!
//! Allocation-free (`heapless`). Compiled for unit tests and under the `std`
//! feature only, so firmware builds never carry the call log.

#![cfg(any(test, feature = "std"))]

use crate::hal::{ChannelId, Dma2dTxHal, DMA2D_TX_CHANNEL_COUNT, MAX_TX_CHANNELS};

/// Maximum number of calls kept in the log. Later calls are counted in
/// [`MockDma2d::dropped_calls`] but not stored.
pub const CALL_LOG_CAPACITY: usize = 1024;

/// One primitive invocation observed by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalCall {
    /// `tx_abort(channel, enable)`
    Abort(ChannelId, bool),
    /// `tx_is_reset_avail(channel)`
    Poll(ChannelId),
    /// `tx_reset_channel(channel)`
    Reset(ChannelId),
}

/// Scripted answer of `tx_is_reset_avail` for one channel.
///
/// Poll numbering restarts every time the abort request is set, so repeated
/// resets of the same channel see the same script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Ready from the `k`-th poll (1-based) after abort onwards.
    /// `ReadyOnPoll(1)` models an idle channel.
    ReadyOnPoll(u16),
    /// Never ready: the channel is stuck.
    Never,
}

#[derive(Clone, Copy)]
struct ChannelState {
    readiness: Readiness,
    abort: bool,
    polls_since_abort: u16,
}

impl ChannelState {
    const IDLE: Self = Self {
        readiness: Readiness::ReadyOnPoll(1),
        abort: false,
        polls_since_abort: 0,
    };
}

/// Recording mock of a 2D-DMA device.
pub struct MockDma2d {
    channel_count: u8,
    channels: [ChannelState; MAX_TX_CHANNELS],
    calls: heapless::Vec<HalCall, CALL_LOG_CAPACITY>,
    dropped_calls: usize,
}

impl MockDma2d {
    /// Create a mock with [`DMA2D_TX_CHANNEL_COUNT`] idle channels.
    pub fn new() -> Self {
        Self::with_channel_count(DMA2D_TX_CHANNEL_COUNT)
    }

    /// Create a mock reporting `count` transmit channels, all idle.
    ///
    /// Counts above [`MAX_TX_CHANNELS`] are reported as-is; channels beyond
    /// that capacity are never ready.
    pub fn with_channel_count(count: u8) -> Self {
        Self {
            channel_count: count,
            channels: [ChannelState::IDLE; MAX_TX_CHANNELS],
            calls: heapless::Vec::new(),
            dropped_calls: 0,
        }
    }

    /// Set the readiness script for `channel`.
    pub fn set_readiness(&mut self, channel: ChannelId, readiness: Readiness) {
        if let Some(state) = self.state_mut(channel) {
            state.readiness = readiness;
        }
    }

    /// Current abort-request flag of `channel`.
    pub fn abort_flag(&self, channel: ChannelId) -> bool {
        self.state(channel).is_some_and(|state| state.abort)
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[HalCall] {
        &self.calls
    }

    /// Forget recorded calls. Channel state is kept.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.dropped_calls = 0;
    }

    /// Calls that did not fit in the log.
    pub fn dropped_calls(&self) -> usize {
        self.dropped_calls
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: HalCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Number of recorded readiness polls on `channel`.
    pub fn polls(&self, channel: ChannelId) -> usize {
        self.count(HalCall::Poll(channel))
    }

    /// Number of recorded reset commits on `channel`.
    pub fn resets(&self, channel: ChannelId) -> usize {
        self.count(HalCall::Reset(channel))
    }

    /// Position of the first recorded occurrence of `call`.
    pub fn position(&self, call: HalCall) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }

    /// Position of the last recorded occurrence of `call`.
    pub fn last_position(&self, call: HalCall) -> Option<usize> {
        self.calls.iter().rposition(|c| *c == call)
    }

    fn record(&mut self, call: HalCall) {
        if self.calls.push(call).is_err() {
            self.dropped_calls = self.dropped_calls.saturating_add(1);
        }
    }

    fn state(&self, channel: ChannelId) -> Option<&ChannelState> {
        self.channels.get(usize::from(channel.index()))
    }

    fn state_mut(&mut self, channel: ChannelId) -> Option<&mut ChannelState> {
        self.channels.get_mut(usize::from(channel.index()))
    }
}

impl Default for MockDma2d {
    fn default() -> Self {
        Self::new()
    }
}

impl Dma2dTxHal for MockDma2d {
    fn tx_abort(&mut self, channel: ChannelId, enable: bool) {
        self.record(HalCall::Abort(channel, enable));
        if let Some(state) = self.state_mut(channel) {
            if enable && !state.abort {
                state.polls_since_abort = 0;
            }
            state.abort = enable;
        }
    }

    fn tx_is_reset_avail(&mut self, channel: ChannelId) -> bool {
        self.record(HalCall::Poll(channel));
        let Some(state) = self.state_mut(channel) else {
            return false;
        };
        state.polls_since_abort = state.polls_since_abort.saturating_add(1);
        match state.readiness {
            Readiness::ReadyOnPoll(k) => state.polls_since_abort >= k,
            Readiness::Never => false,
        }
    }

    fn tx_reset_channel(&mut self, channel: ChannelId) {
        self.record(HalCall::Reset(channel));
    }

    fn tx_channel_count(&self) -> u8 {
        self.channel_count
    }
}
