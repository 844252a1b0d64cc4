//! Time-division multiplexing of digits onto a shared 4-bit data bus.
//!
//! A [`MuxDisplay`] owns the four data-bit lines plus one select line per
//! digit, all as already-configured [`OutputPin`]s. One [`render`] call is a
//! single sweep: for each digit window it deasserts every select line, drives
//! the bus to that digit's binary value, then asserts that window's select
//! line. Flicker-free output depends on the embedding firmware repeating the
//! sweep at tens of hertz; the driver never schedules its own refresh.
//!
//! [`render`]: MuxDisplay::render

use embedded_hal::digital::{OutputPin, PinState};

use crate::bcd::{self, BcdError, DigitSequence};

/// Width of the shared data bus; one line per bit of a BCD digit.
pub const DATA_BUS_WIDTH: usize = 4;

/// Errors reported while driving the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The sequence length does not match the display's digit count.
    DigitCountMismatch,
    /// Conversion failed before any pin was touched.
    Encode(BcdError),
    /// An output pin reported a fault.
    Gpio,
}

impl From<BcdError> for DisplayError {
    fn from(err: BcdError) -> Self {
        DisplayError::Encode(err)
    }
}

/// Policy for digit windows holding a leading zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LeadingZeros {
    /// Light leading zeros like any other digit.
    #[default]
    Show,
    /// Leave the select line of leading-zero windows deasserted. The final
    /// digit is always lit, so zero still reads as `0`.
    Blank,
}

/// Driver for a `DIGITS`-wide display on a shared 4-bit data bus.
///
/// `D` are the data-bit lines (bit 0 of a digit drives `data_bus[0]`), `S`
/// the digit-select lines, in display order (most-significant digit first).
/// The pins are exclusively owned for the lifetime of the driver; callers
/// that refresh from a timer interrupt while updating elsewhere must
/// serialize access, e.g. through [`crate::mutex::SharedDisplay`].
pub struct MuxDisplay<D, S, const DIGITS: usize>
where
    D: OutputPin,
    S: OutputPin,
{
    /// Shared bit lines carrying the active digit's binary value.
    data_bus: [D; DATA_BUS_WIDTH],
    /// Per-digit select lines; at most one is ever asserted.
    digit_select: [S; DIGITS],
    /// Rendering policy for leading zeros.
    leading_zeros: LeadingZeros,
}

impl<D, S, const DIGITS: usize> MuxDisplay<D, S, DIGITS>
where
    D: OutputPin,
    S: OutputPin,
{
    /// Creates a driver from already-configured output pins.
    ///
    /// Leading zeros are shown by default; see [`Self::set_leading_zeros`].
    pub fn new(data_bus: [D; DATA_BUS_WIDTH], digit_select: [S; DIGITS]) -> Self {
        Self {
            data_bus,
            digit_select,
            leading_zeros: LeadingZeros::default(),
        }
    }

    /// Changes how leading zeros are rendered on subsequent sweeps.
    pub fn set_leading_zeros(&mut self, policy: LeadingZeros) {
        self.leading_zeros = policy;
    }

    /// Converts `value` to the display's digit width and renders it.
    ///
    /// On [`BcdError::Overflow`] (or any other error) no pin is driven, so
    /// whatever the display held before stays visible.
    pub fn show(&mut self, value: u32) -> Result<(), DisplayError> {
        let digits = bcd::encode(value, DIGITS)?;
        self.render(&digits)
    }

    /// Drives one full sweep over the digit windows.
    ///
    /// Window order and intra-window step order are fixed: deassert every
    /// select line, drive the data bus, assert the window's select line.
    /// Reordering would briefly light a digit with a stale bus pattern.
    /// The sweep is a single pass; the final window's select line is left
    /// asserted until the next call.
    pub fn render(&mut self, digits: &DigitSequence) -> Result<(), DisplayError> {
        if digits.len() != DIGITS {
            return Err(DisplayError::DigitCountMismatch);
        }
        let blank_until = match self.leading_zeros {
            LeadingZeros::Show => 0,
            LeadingZeros::Blank => digits.leading_zeros(),
        };

        for (window, &digit) in digits.as_slice().iter().enumerate() {
            self.deselect_all()?;
            if window < blank_until {
                continue;
            }
            self.drive_data_bus(digit)?;
            self.digit_select[window]
                .set_high()
                .map_err(|_| DisplayError::Gpio)?;
            #[cfg(feature = "trace_render")]
            defmt::trace!("digit window {=usize} driving {=u8}", window, digit);
        }
        Ok(())
    }

    /// Blanks the display: every select line and data line low.
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.deselect_all()?;
        for line in &mut self.data_bus {
            line.set_low().map_err(|_| DisplayError::Gpio)?;
        }
        Ok(())
    }

    /// Releases the pins for reuse elsewhere.
    pub fn release(self) -> ([D; DATA_BUS_WIDTH], [S; DIGITS]) {
        (self.data_bus, self.digit_select)
    }

    /// Deasserts every digit-select line.
    fn deselect_all(&mut self) -> Result<(), DisplayError> {
        for select in &mut self.digit_select {
            select.set_low().map_err(|_| DisplayError::Gpio)?;
        }
        Ok(())
    }

    /// Drives the data bus to the binary value of `digit`, bit 0 first.
    fn drive_data_bus(&mut self, digit: u8) -> Result<(), DisplayError> {
        debug_assert!(digit <= 9, "digit value escaped BCD range");
        for (bit, line) in self.data_bus.iter_mut().enumerate() {
            line.set_state(PinState::from(digit & (1 << bit) != 0))
                .map_err(|_| DisplayError::Gpio)?;
        }
        Ok(())
    }
}
