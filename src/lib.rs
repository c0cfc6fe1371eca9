//! SHT1x Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the Sensirion SHT1x family
//! (SHT10, SHT11, SHT15) of temperature and humidity sensors, built on top of the
//! [`embedded-hal`] traits.
//!
//! The SHT1x speaks a two-wire protocol that looks like I²C but is not: there is no
//! addressing, transmissions open with a dedicated start pattern and the sensor signals
//! the end of a conversion by pulling DATA low. The driver bit-bangs that protocol on
//! two GPIOs.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Calibrated Celsius/Fahrenheit temperature and relative humidity
//! - Status register access: resolution, internal heater, end-of-battery flag
//!
//! # Wiring
//! - DATA must be an open-drain pin with a pull-up (external 10k is typical). It is
//!   released by driving it high and sampled through [`InputPin`].
//! - SCK is a plain push-pull [`OutputPin`].
//! - Timing uses [`DelayNs`].
//!
//! # Optional Features
//! - `resolution-control` (default): read and change the measurement resolution
//! - `heater-control` (default): read and switch the internal heater
//! - `fahrenheit` (default): add a Fahrenheit field to [`Sample`]
//! - `voltage-control` (default): compensate the temperature offset for the supply voltage
//! - `crc`: read and verify the checksum the sensor appends to every response
//! - `defmt`: Implements `defmt::Format` and logs through `defmt`
//! - `log`: Logs through the `log` facade
//!
//! # Example
//!
//! ```ignore
//! use sht1x::{Resolution, Sht1x};
//!
//! let mut sht = Sht1x::new(data_pin, sck_pin, delay);
//! sht.init()?;
//! sht.soft_reset()?;
//! sht.set_resolution(Resolution::High)?;
//!
//! let sample = sht.read_sample()?;
//! println!("{} °C, {} %RH", sample.temperature_celsius, sample.relative_humidity);
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!(
    "Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together"
);

mod macros;

#[cfg(feature = "crc")]
mod checksum;
pub mod conversion;
pub mod error;
pub mod sht1x;
mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::Sht1xError;
pub use sht1x::{Sample, Sht1x};
pub use types::{Heater, Quantity, Resolution, Status};
