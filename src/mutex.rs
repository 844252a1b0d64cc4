// SPDX-License-Identifier: Apache-2.0

//! Serialized access to a display shared between contexts.
//!
//! The pins and the bus behind a [`MuxDisplay`] have a single-writer
//! contract: a sweep must never interleave with another write to the same
//! lines. Firmware that refreshes from a timer interrupt while updating the
//! value from a task gets that guarantee the usual way, a
//! [`critical_section::Mutex`] around an `Option` slot held in a `static`.
//! This module provides the slot type plus take/replace accessors so every
//! caller touches the display inside one critical section.
//!
//! ```
//! use digit_mux::display::MuxDisplay;
//! use digit_mux::mutex::{self, SharedDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{ErrorType, OutputPin};
//! # struct StubPin;
//! # impl ErrorType for StubPin { type Error = Infallible; }
//! # impl OutputPin for StubPin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! static DISPLAY: SharedDisplay<StubPin, StubPin, 3> = mutex::new_shared_display();
//!
//! // At bring-up:
//! let data_bus = [StubPin, StubPin, StubPin, StubPin];
//! let digit_select = [StubPin, StubPin, StubPin];
//! mutex::install(&DISPLAY, MuxDisplay::new(data_bus, digit_select));
//!
//! // From the refresh timer, later from tasks, etc.:
//! let outcome = mutex::with_display(&DISPLAY, |display| display.show(451));
//! assert_eq!(outcome, Some(Ok(())));
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

use crate::display::MuxDisplay;

/// A display slot for `static` storage, empty until [`install`] runs.
pub type SharedDisplay<D, S, const DIGITS: usize> =
    Mutex<RefCell<Option<MuxDisplay<D, S, DIGITS>>>>;

/// Creates an empty shared slot; usable as a `static` initializer.
pub const fn new_shared_display<D, S, const DIGITS: usize>() -> SharedDisplay<D, S, DIGITS>
where
    D: OutputPin,
    S: OutputPin,
{
    Mutex::new(RefCell::new(None))
}

/// Moves a configured display into the shared slot.
///
/// Returns the previously installed display, if any, so its pins can be
/// released.
pub fn install<D, S, const DIGITS: usize>(
    slot: &SharedDisplay<D, S, DIGITS>,
    display: MuxDisplay<D, S, DIGITS>,
) -> Option<MuxDisplay<D, S, DIGITS>>
where
    D: OutputPin,
    S: OutputPin,
{
    let previous = critical_section::with(|cs| slot.replace(cs, Some(display)));
    #[cfg(feature = "defmt")]
    if previous.is_some() {
        defmt::warn!("a display was already installed; replacing it");
    }
    previous
}

/// Runs `f` against the installed display inside a critical section.
///
/// Returns `None` if nothing has been installed yet, which callers on an
/// interrupt path typically treat as "not ready, skip this tick".
pub fn with_display<D, S, const DIGITS: usize, R>(
    slot: &SharedDisplay<D, S, DIGITS>,
    f: impl FnOnce(&mut MuxDisplay<D, S, DIGITS>) -> R,
) -> Option<R>
where
    D: OutputPin,
    S: OutputPin,
{
    critical_section::with(|cs| {
        let mut display = slot.take(cs);
        let result = display.as_mut().map(f);
        slot.replace(cs, display);
        result
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorType, OutputPin};

    use super::*;

    /// Pin that counts how many times it was driven.
    #[derive(Default)]
    struct CountingPin {
        writes: usize,
    }

    impl ErrorType for CountingPin {
        type Error = Infallible;
    }

    impl OutputPin for CountingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.writes += 1;
            Ok(())
        }
    }

    fn fresh_display() -> MuxDisplay<CountingPin, CountingPin, 3> {
        MuxDisplay::new(
            core::array::from_fn(|_| CountingPin::default()),
            core::array::from_fn(|_| CountingPin::default()),
        )
    }

    #[test]
    fn test_with_display_on_empty_slot() {
        let slot: SharedDisplay<CountingPin, CountingPin, 3> = new_shared_display();
        assert_eq!(with_display(&slot, |display| display.show(1)), None);
    }

    #[test]
    fn test_install_then_drive() {
        let slot: SharedDisplay<CountingPin, CountingPin, 3> = new_shared_display();
        assert!(install(&slot, fresh_display()).is_none());

        assert_eq!(with_display(&slot, |display| display.show(451)), Some(Ok(())));
        // The display stays installed across calls
        assert_eq!(with_display(&slot, |display| display.show(452)), Some(Ok(())));
    }

    #[test]
    fn test_install_returns_displaced_display() {
        let slot: SharedDisplay<CountingPin, CountingPin, 3> = new_shared_display();
        install(&slot, fresh_display());
        with_display(&slot, |display| display.show(7)).unwrap().unwrap();

        let displaced = install(&slot, fresh_display()).unwrap();
        let (data_bus, _) = displaced.release();
        assert!(data_bus.iter().any(|pin| pin.writes > 0));
    }
}
