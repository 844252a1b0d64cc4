//! Driver for a small multiplexed digit display: a shared 4-bit data bus
//! carrying one BCD digit at a time, plus one select line per digit. The
//! [`bcd`] module converts an unsigned integer into a fixed-width digit
//! sequence with overflow detection; the [`display`] module sweeps that
//! sequence over the digit windows through any
//! [`embedded_hal::digital::OutputPin`] implementation, so the same driver
//! runs on every HAL that speaks embedded-hal 1.0.
//!
//! The driver is synchronous and stateless between calls: one
//! [`render`](display::MuxDisplay::render) is one sweep, and a flicker-free
//! image comes from the embedding firmware repeating the sweep from its own
//! timer at tens of hertz. The [`mutex`] module carries the shared-slot
//! pattern for exactly that split (refresh in an interrupt, updates in a
//! task).
//!
//! ## Crate features
//!
//! - `defmt`: Implements `defmt::Format` for the public types and enables
//!   defmt diagnostics in the [`mutex`] helpers.
//! - `trace_render`: Logs every digit window driven during a render sweep.
//!   Very noisy! Implies `defmt`.
//!
//! ## Demo
//!
//! The display below is 3 digits wide; swap the stub pins for your HAL's
//! push-pull outputs (e.g. `into_push_pull_output()` on an RP2040) and keep
//! the arrays in display order, most-significant digit first.
//!
//! ```
//! use digit_mux::bcd;
//! use digit_mux::display::MuxDisplay;
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{ErrorType, OutputPin};
//! # struct StubPin;
//! # impl ErrorType for StubPin { type Error = Infallible; }
//! # impl OutputPin for StubPin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! // Data bus lines carry bit 0..=3 of the active digit; select lines pick
//! // which digit window is lit.
//! let data_bus = [StubPin, StubPin, StubPin, StubPin];
//! let digit_select = [StubPin, StubPin, StubPin];
//! let mut display = MuxDisplay::new(data_bus, digit_select);
//!
//! // Conversion alone, when the digits themselves are wanted:
//! let digits = bcd::encode(908, 3)?;
//! assert_eq!(digits.as_slice(), &[9, 0, 8]);
//!
//! // One sweep over the three windows:
//! display.render(&digits)?;
//!
//! // Or let the display convert with its own width. A value that does not
//! // fit is rejected before any pin is touched:
//! display.show(451)?;
//! assert!(display.show(1000).is_err());
//! # Ok::<(), digit_mux::display::DisplayError>(())
//! ```

// Copyright 2025 the digit_mux authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![no_std]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), feature(doc_auto_cfg), feature(doc_cfg_hide))]

pub mod bcd;
pub mod display;
pub mod mutex;
