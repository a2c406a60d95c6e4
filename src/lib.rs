#![cfg_attr(not(test), no_std)]

//! # GPRS modem
//!
//! Driver for GSM/GPRS modems speaking the GSM 07.05/07.07 AT command set
//! over a plain serial link. It covers the request/response cycle with the
//! modem (command framing, response capture and field extraction) and the
//! operations built on top of it: presence probe, signal probe, SMS send and
//! SMS receive.
//!
//! The transport is anything implementing the `embedded-io-async` [`Read`]
//! and [`Write`] traits together with `embedded-io`'s [`ReadReady`].
//!
//! ```ignore
//! let state = gprs_modem::asynch::State::new(uart);
//! let control = gprs_modem::asynch::Control::new(&state, Config::new("+5511999999999"));
//!
//! if control.probe_presence().await? {
//!     control.send_text("hello").await?;
//! }
//! ```
//!
//! [`Read`]: embedded_io_async::Read
//! [`Write`]: embedded_io_async::Write
//! [`ReadReady`]: embedded_io::ReadReady

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod asynch;
pub mod buffer;
pub mod command;
pub mod config;
pub mod error;
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use buffer::{OverflowPolicy, ResponseBuffer, RESPONSE_CAPACITY};
pub use config::{Config, ModemConfig};
pub use error::Error;
