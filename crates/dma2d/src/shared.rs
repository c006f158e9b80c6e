//! Reset of a device shared between execution contexts.
//!
//! The 2D-DMA registers are one shared resource for every driver that uses
//! the engine (display pipeline, pixel-processing accelerator). When the
//! device handle lives in a `static`, callers wrap it in an
//! [`embassy_sync::blocking_mutex::Mutex`] and reset through
//! [`reset_channel_shared`], which holds the lock for exactly one sequence.
//!
//! ```rust
//! # #[cfg(feature = "std")] {
//! use core::cell::RefCell;
//! use dma2d::mocks::MockDma2d;
//! use dma2d::shared::reset_channel_shared;
//! use dma2d::{ChannelId, ChannelResetController};
//! use embassy_sync::blocking_mutex::{raw::NoopRawMutex, Mutex};
//!
//! let device: Mutex<NoopRawMutex, _> = Mutex::new(RefCell::new(MockDma2d::new()));
//! let controller = ChannelResetController::default();
//! let attempt = reset_channel_shared(&device, &controller, ChannelId::new(0)).unwrap();
//! assert!(attempt.is_quiescent());
//! # }
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::controller::ChannelResetController;
use crate::hal::{ChannelId, Dma2dTxHal};
use crate::outcome::{ResetAttempt, ResetError};

/// Lock `device`, reset `channel`, release the lock.
///
/// With `CriticalSectionRawMutex` the whole sequence, including the busy
/// poll, runs with interrupts masked. Keep the poll budget small in that
/// configuration.
///
/// # Errors
///
/// [`ResetError::DeviceBusy`] if the device is already mutably borrowed by
/// an enclosing `lock` on the same mutex. No hardware call is issued.
pub fn reset_channel_shared<M, H>(
    device: &Mutex<M, RefCell<H>>,
    controller: &ChannelResetController,
    channel: ChannelId,
) -> Result<ResetAttempt, ResetError>
where
    M: RawMutex,
    H: Dma2dTxHal,
{
    device.lock(|cell| {
        let mut hal = cell.try_borrow_mut().map_err(|_| ResetError::DeviceBusy)?;
        Ok(controller.reset_channel(&mut *hal, channel))
    })
}

/// Checked-index variant of [`reset_channel_shared`].
///
/// # Errors
///
/// [`ResetError::InvalidChannel`] or [`ResetError::DeviceBusy`]; neither
/// touches the hardware.
pub fn try_reset_channel_shared<M, H>(
    device: &Mutex<M, RefCell<H>>,
    controller: &ChannelResetController,
    index: u8,
) -> Result<ResetAttempt, ResetError>
where
    M: RawMutex,
    H: Dma2dTxHal,
{
    device.lock(|cell| {
        let mut hal = cell.try_borrow_mut().map_err(|_| ResetError::DeviceBusy)?;
        controller.try_reset_channel(&mut *hal, index)
    })
}
