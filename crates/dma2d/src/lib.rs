//! 2D-DMA transmit channel reset for the ESP32-P4 display pipeline
//!
//! Brings a 2D-DMA transmit channel from "possibly mid-transfer" to a known,
//! reset state using three driver primitives: abort, poll reset-available,
//! reset commit. Everything else about the DMA engine (descriptors, data
//! transfer, the LCD and pixel-processing blocks feeding it) stays in the
//! vendor driver.
//!
//! # Architecture Layers
//!
//! ```text
//! Driver init / error recovery (caller)
//!         ↓
//! ChannelResetController (this crate - bounded reset sequence)
//!         ↓
//! Dma2dTxHal (trait - abort / is_reset_avail / reset_channel)
//!         ↓
//! Vendor 2D-DMA low-level driver
//! ```
//!
//! # Modules
//!
//! - [`hal`] - hardware capability trait and channel index
//! - [`policy`] - poll bound configuration
//! - [`outcome`] - reset results and errors
//! - [`controller`] - the reset sequence driver
//! - [`shared`] - reset through a scoped blocking mutex
//! - [`recovery`] - caller-side timeout tracking
//! - `mocks` - recording test double (`std` feature)
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and the `mocks` test double (host builds)
//! - `defmt`: `defmt::Format` derives and firmware log sites
//! - `tracing`: host log sites
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "std")] {
//! use dma2d::mocks::{MockDma2d, Readiness};
//! use dma2d::{reset_channel, ChannelId, ResetOutcome};
//!
//! let mut hal = MockDma2d::new();
//! let ch = ChannelId::new(0);
//! hal.set_readiness(ch, Readiness::ReadyOnPoll(4));
//!
//! assert_eq!(reset_channel(&mut hal, ch), ResetOutcome::Quiescent { polls: 4 });
//! assert!(!hal.abort_flag(ch));
//! # }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register and driver names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod controller;
pub mod hal;
#[cfg(any(test, feature = "std"))]
pub mod mocks;
pub mod outcome;
pub mod policy;
pub mod recovery;
mod sequence;
pub mod shared;

pub use controller::{reset_channel, ChannelResetController};
pub use hal::{ChannelId, Dma2dTxHal, OutOfRangeError, DMA2D_TX_CHANNEL_COUNT, MAX_TX_CHANNELS};
pub use outcome::{ResetAttempt, ResetError, ResetOutcome};
pub use policy::{PollBudget, ResetPolicy, DEFAULT_MAX_POLLS};
pub use recovery::ChannelRecoveryState;
