//! Reset sequence contract tests against the recording mock.
//!
//! Every reset must issue: abort-set, 1..=bound polls, exactly one reset
//! commit, exactly one abort-clear, in that order, and leave the abort flag
//! clear whether or not the channel went quiet.

// Test files legitimately use arithmetic for verification; allow at file level.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used)]

use dma2d::mocks::{HalCall, MockDma2d, Readiness};
use dma2d::{
    reset_channel, ChannelId, ChannelResetController, PollBudget, ResetError, ResetOutcome,
    ResetPolicy, DEFAULT_MAX_POLLS,
};

fn assert_sequence(hal: &MockDma2d, ch: ChannelId, polls: usize) {
    let mut expected = vec![HalCall::Abort(ch, true)];
    expected.extend(core::iter::repeat(HalCall::Poll(ch)).take(polls));
    expected.push(HalCall::Reset(ch));
    expected.push(HalCall::Abort(ch, false));
    assert_eq!(hal.calls(), expected.as_slice());
}

// Test 1: abort flag is clear after return, quiescent case
#[test]
fn abort_flag_clear_after_quiescent_reset() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(0);
    reset_channel(&mut hal, ch);
    assert!(!hal.abort_flag(ch));
}

// Test 2: abort flag is clear after return, timeout case
#[test]
fn abort_flag_clear_after_timed_out_reset() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(1);
    hal.set_readiness(ch, Readiness::Never);
    reset_channel(&mut hal, ch);
    assert!(!hal.abort_flag(ch));
}

// Test 3: ready on poll k => k polls, one reset, one abort-clear
#[test]
fn ready_on_poll_k_spends_exactly_k_polls() {
    for k in [1u16, 2, 17, 99, 100] {
        let mut hal = MockDma2d::new();
        let ch = ChannelId::new(2);
        hal.set_readiness(ch, Readiness::ReadyOnPoll(k));

        let outcome = reset_channel(&mut hal, ch);

        assert_eq!(outcome, ResetOutcome::Quiescent { polls: k });
        assert_sequence(&hal, ch, usize::from(k));
    }
}

// Test 4: never ready => 100 polls, reset still committed, timeout reported
#[test]
fn never_ready_times_out_after_default_bound() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(0);
    hal.set_readiness(ch, Readiness::Never);

    let outcome = reset_channel(&mut hal, ch);

    assert_eq!(outcome, ResetOutcome::TimedOut { polls: 100 });
    assert!(outcome.is_timeout());
    assert_sequence(&hal, ch, usize::from(DEFAULT_MAX_POLLS));
}

// Test 5: ready only after the bound is the same as never ready
#[test]
fn ready_after_bound_is_a_timeout() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(0);
    hal.set_readiness(ch, Readiness::ReadyOnPoll(101));

    let outcome = reset_channel(&mut hal, ch);

    assert_eq!(outcome, ResetOutcome::TimedOut { polls: 100 });
    assert_eq!(hal.polls(ch), 100);
    assert_eq!(hal.resets(ch), 1);
}

// Test 6: idle channel => quiescent with one poll
#[test]
fn idle_channel_is_quiescent_on_first_poll() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(1);
    assert_eq!(
        reset_channel(&mut hal, ch),
        ResetOutcome::Quiescent { polls: 1 }
    );
    assert_sequence(&hal, ch, 1);
}

// Test 7: ordering invariant holds for both forks
#[test]
fn abort_before_reset_before_clear() {
    for readiness in [Readiness::ReadyOnPoll(1), Readiness::ReadyOnPoll(50), Readiness::Never] {
        let mut hal = MockDma2d::new();
        let ch = ChannelId::new(0);
        hal.set_readiness(ch, readiness);

        reset_channel(&mut hal, ch);

        let set = hal.position(HalCall::Abort(ch, true)).unwrap();
        let reset = hal.position(HalCall::Reset(ch)).unwrap();
        let clear = hal.position(HalCall::Abort(ch, false)).unwrap();
        assert!(set < reset, "reset committed before abort request");
        assert!(reset < clear, "abort cleared before reset commit");
        assert_eq!(hal.last_position(HalCall::Poll(ch)).unwrap(), reset - 1);
    }
}

// Test 8: repeated invocation gives the same outcome and call pattern
#[test]
fn repeated_reset_is_idempotent() {
    for readiness in [Readiness::ReadyOnPoll(3), Readiness::Never] {
        let mut hal = MockDma2d::new();
        let ch = ChannelId::new(2);
        hal.set_readiness(ch, readiness);

        let first = reset_channel(&mut hal, ch);
        let first_calls = hal.calls().to_vec();
        hal.clear_calls();
        let second = reset_channel(&mut hal, ch);

        assert_eq!(first, second);
        assert_eq!(first_calls.as_slice(), hal.calls());
        assert!(!hal.abort_flag(ch));
    }
}

// Test 9: reset of one channel never touches another
#[test]
fn reset_is_confined_to_one_channel() {
    let mut hal = MockDma2d::new();
    let target = ChannelId::new(1);
    hal.set_readiness(target, Readiness::Never);

    ChannelResetController::default().reset_channel(&mut hal, target);

    assert!(hal.calls().iter().all(|call| match call {
        HalCall::Abort(ch, _) | HalCall::Poll(ch) | HalCall::Reset(ch) => *ch == target,
    }));
}

// Test 10: configured bound replaces the default
#[test]
fn configured_bound_is_honoured() {
    let mut hal = MockDma2d::new();
    let ch = ChannelId::new(0);
    hal.set_readiness(ch, Readiness::Never);
    let controller =
        ChannelResetController::new(ResetPolicy::with_max_polls(PollBudget::try_new(250).unwrap()));

    let attempt = controller.reset_channel(&mut hal, ch);

    assert_eq!(attempt.polls(), 250);
    assert_sequence(&hal, ch, 250);
    assert_eq!(
        attempt.into_result(),
        Err(ResetError::Timeout {
            channel: ch,
            polls: 250
        })
    );
}

// Test 11: reset_all leaves every abort flag clear
#[test]
fn reset_all_clears_every_abort_flag() {
    let mut hal = MockDma2d::new();
    hal.set_readiness(ChannelId::new(0), Readiness::ReadyOnPoll(10));
    hal.set_readiness(ChannelId::new(2), Readiness::Never);

    let attempts = ChannelResetController::default().reset_all(&mut hal);

    assert_eq!(attempts.len(), 3);
    for index in 0..3 {
        let ch = ChannelId::new(index);
        assert!(!hal.abort_flag(ch));
        assert_eq!(hal.resets(ch), 1);
    }
    assert_eq!(attempts[0].outcome, ResetOutcome::Quiescent { polls: 10 });
    assert_eq!(attempts[1].outcome, ResetOutcome::Quiescent { polls: 1 });
    assert_eq!(attempts[2].outcome, ResetOutcome::TimedOut { polls: 100 });
}

// Test 12: reset_all finishes one channel before starting the next
#[test]
fn reset_all_does_not_interleave_channels() {
    let mut hal = MockDma2d::new();
    ChannelResetController::default().reset_all(&mut hal);

    let clear0 = hal.position(HalCall::Abort(ChannelId::new(0), false)).unwrap();
    let set1 = hal.position(HalCall::Abort(ChannelId::new(1), true)).unwrap();
    let clear1 = hal.position(HalCall::Abort(ChannelId::new(1), false)).unwrap();
    let set2 = hal.position(HalCall::Abort(ChannelId::new(2), true)).unwrap();
    assert!(clear0 < set1);
    assert!(clear1 < set2);
}

// Test 13: checked entry point refuses indices the device does not have
#[test]
fn checked_reset_respects_device_channel_count() {
    let mut hal = MockDma2d::with_channel_count(2);
    let controller = ChannelResetController::default();

    assert!(controller.try_reset_channel(&mut hal, 1).is_ok());
    hal.clear_calls();
    let err = controller.try_reset_channel(&mut hal, 2).unwrap_err();

    assert!(matches!(err, ResetError::InvalidChannel(e) if e.value == 2 && e.max == 1));
    assert!(hal.calls().is_empty());
}
