//! 2D-DMA transmit channel hardware capabilities.
//!
//! The reset controller never touches registers itself. It drives a channel
//! through the three primitives of [`Dma2dTxHal`], which the vendor driver
//! layer (or a test double) implements for one device instance.
//!
//! | Primitive               | ESP-IDF low-level call                   |
//! |-------------------------|------------------------------------------|
//! | `tx_abort(ch, enable)`  | `dma2d_ll_tx_abort(dev, ch, enable)`     |
//! | `tx_is_reset_avail(ch)` | `dma2d_ll_tx_is_reset_avail(dev, ch)`    |
//! | `tx_reset_channel(ch)`  | `dma2d_ll_tx_reset_channel(dev, ch)`     |

use core::fmt;

/// Number of transmit channels on the ESP32-P4 2D-DMA engine.
pub const DMA2D_TX_CHANNEL_COUNT: u8 = 3;

/// Upper bound on transmit channels any [`Dma2dTxHal`] may report.
///
/// Sizes the fixed-capacity result of
/// [`ChannelResetController::reset_all`](crate::ChannelResetController::reset_all).
pub const MAX_TX_CHANNELS: usize = 8;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} outside {}..={}",
            self.value, self.min, self.max
        )
    }
}

// ── ChannelId ────────────────────────────────────────────────────────────────

/// Index of one transmit channel on a 2D-DMA device.
///
/// Carries no device reference: the device is always borrowed separately for
/// the duration of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Wrap a channel index the caller already knows to be valid.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Create a `ChannelId`, returning an error if `index >= count`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `index` does not name one of the
    /// `count` channels. A device with zero channels rejects every index.
    pub fn try_new(index: u8, count: u8) -> Result<Self, OutOfRangeError> {
        if index < count {
            Ok(Self(index))
        } else {
            Err(OutOfRangeError {
                value: u32::from(index),
                min: 0,
                max: u32::from(count.saturating_sub(1)),
            })
        }
    }

    /// Return the raw channel index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx{}", self.0)
    }
}

// ── Capability trait ─────────────────────────────────────────────────────────

/// Transmit-channel control primitives exposed by the 2D-DMA driver layer.
///
/// Implementations are assumed infallible: a failed register write is not
/// observable at this level.
///
/// Exclusive access is expressed by `&mut self`. Callers sharing one device
/// between contexts wrap it in a lock (see [`crate::shared`]).
pub trait Dma2dTxHal {
    /// Set (`enable = true`) or clear the abort-request condition of `channel`.
    fn tx_abort(&mut self, channel: ChannelId, enable: bool);

    /// Whether the reset-enable condition of `channel` currently holds.
    fn tx_is_reset_avail(&mut self, channel: ChannelId) -> bool;

    /// Commit the channel register reset.
    fn tx_reset_channel(&mut self, channel: ChannelId);

    /// Number of transmit channels on this device.
    fn tx_channel_count(&self) -> u8 {
        DMA2D_TX_CHANNEL_COUNT
    }
}

impl<T: Dma2dTxHal + ?Sized> Dma2dTxHal for &mut T {
    fn tx_abort(&mut self, channel: ChannelId, enable: bool) {
        (**self).tx_abort(channel, enable);
    }

    fn tx_is_reset_avail(&mut self, channel: ChannelId) -> bool {
        (**self).tx_is_reset_avail(channel)
    }

    fn tx_reset_channel(&mut self, channel: ChannelId) {
        (**self).tx_reset_channel(channel);
    }

    fn tx_channel_count(&self) -> u8 {
        (**self).tx_channel_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_indices_below_count() {
        assert_eq!(ChannelId::try_new(0, 3), Ok(ChannelId::new(0)));
        assert_eq!(ChannelId::try_new(2, 3), Ok(ChannelId::new(2)));
    }

    #[test]
    fn try_new_rejects_index_equal_to_count() {
        assert_eq!(
            ChannelId::try_new(3, 3),
            Err(OutOfRangeError {
                value: 3,
                min: 0,
                max: 2
            })
        );
    }

    #[test]
    fn try_new_rejects_everything_on_empty_device() {
        assert!(ChannelId::try_new(0, 0).is_err());
    }

    #[test]
    fn channel_id_is_one_byte() {
        assert_eq!(core::mem::size_of::<ChannelId>(), 1);
    }
}
