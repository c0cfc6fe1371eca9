use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

#[cfg(feature = "crc")]
use crate::checksum::checksum;
use crate::conversion;
use crate::error::Sht1xError;
#[cfg(feature = "crc")]
use crate::macros::warn;
use crate::macros::{debug, trace};
use crate::transport::Ack;
#[cfg(feature = "heater-control")]
use crate::types::Heater;
use crate::types::{Command, Quantity, Resolution, Status};

/// Maximum time to wait (in milliseconds) for a conversion to finish.
///
/// A 14-bit temperature conversion takes up to 320 ms, the slowest of all modes.
const MEASUREMENT_TIMEOUT_MS: u16 = 320;

/// Time (in milliseconds) the sensor needs to come back up after a soft reset.
const SOFT_RESET_DELAY_MS: u32 = 11;

/// Driver for the SHT1x temperature and humidity sensor.
///
/// The driver mirrors the status register so it can pick the right conversion
/// coefficients. Setters write the device first and only update the mirror once the
/// write was acknowledged; getters always read the device, so a sensor that lost power
/// and came back with defaults is picked up on the next read.
pub struct Sht1x<DATA, SCK, D> {
    pub(crate) data: DATA,
    pub(crate) sck: SCK,
    pub(crate) delay: D,
    status: Status,
    #[cfg(feature = "voltage-control")]
    d1: f32,
}

/// Sample returned by the SHT1x sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Raw temperature count (14 or 12 bits).
    pub temperature_raw: u16,
    /// Raw humidity count (12 or 8 bits).
    pub humidity_raw: u16,
    /// Temperature in degrees Celsius.
    pub temperature_celsius: f32,
    /// Temperature in degrees Fahrenheit.
    #[cfg(feature = "fahrenheit")]
    pub temperature_fahrenheit: f32,
    /// Temperature compensated relative humidity in percent.
    pub relative_humidity: f32,
}

impl Sample {
    /// Converts a pair of raw counts taken at `resolution`.
    ///
    /// `d1` is the temperature offset for the sensor's supply voltage, see
    /// [`conversion::D1_5V`].
    pub fn from_raw(
        temperature_raw: u16,
        humidity_raw: u16,
        resolution: Resolution,
        d1: f32,
    ) -> Self {
        let temperature_celsius = conversion::temperature_celsius(temperature_raw, resolution, d1);
        Sample {
            temperature_raw,
            humidity_raw,
            temperature_celsius,
            #[cfg(feature = "fahrenheit")]
            temperature_fahrenheit: conversion::celsius_to_fahrenheit(temperature_celsius),
            relative_humidity: conversion::relative_humidity(
                humidity_raw,
                resolution,
                temperature_celsius,
            ),
        }
    }
}

impl<DATA, SCK, D, E> Sht1x<DATA, SCK, D>
where
    DATA: InputPin<Error = E> + OutputPin<Error = E>,
    SCK: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Creates a new instance of the SHT1x driver.
    ///
    /// No pin is touched until [`init`](Self::init). The driver assumes the power-on
    /// defaults (high resolution, heater off, 5 V supply).
    ///
    /// # Arguments
    ///
    /// * `data` - The open-drain GPIO pin connected to DATA. Must support both input and output.
    /// * `sck` - The GPIO pin connected to SCK.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(data: DATA, sck: SCK, delay: D) -> Self {
        Sht1x {
            data,
            sck,
            delay,
            status: Status::default(),
            #[cfg(feature = "voltage-control")]
            d1: conversion::D1_5V,
        }
    }

    /// Puts both lines into their idle (high) state.
    pub fn init(&mut self) -> Result<(), Sht1xError<E>> {
        self.data.set_high()?;
        self.sck.set_high()?;
        Ok(())
    }

    /// Gives back the pins and the delay provider.
    pub fn release(self) -> (DATA, SCK, D) {
        (self.data, self.sck, self.delay)
    }

    /// Resets the sensor and restores the default status register.
    ///
    /// Waits for the sensor to come back before returning. Nothing is waited for when
    /// the reset command is not acknowledged.
    pub fn soft_reset(&mut self) -> Result<(), Sht1xError<E>> {
        self.transmission_start()?;
        self.write_byte(Command::SoftReset.code())?;
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        self.status = Status::default();
        debug!("sht1x: soft reset");
        Ok(())
    }

    /// Resynchronizes a bus left in the middle of a transfer. Unlike
    /// [`soft_reset`](Self::soft_reset) the status register keeps its content.
    pub fn reset_connection(&mut self) -> Result<(), Sht1xError<E>> {
        self.connection_reset()?;
        debug!("sht1x: connection reset");
        Ok(())
    }

    /// Reads the status register.
    pub fn read_status(&mut self) -> Result<Status, Sht1xError<E>> {
        let status = self.fetch_status()?;
        self.status = status;
        Ok(status)
    }

    /// Writes the writable bits (resolution, OTP reload, heater) of the status register.
    pub fn write_status(&mut self, status: Status) -> Result<(), Sht1xError<E>> {
        let value = status.writable_bits();
        self.transmission_start()?;
        self.write_byte(Command::WriteStatus.code())?;
        self.write_byte(value)?;
        self.status = Status::from(value);
        trace!("sht1x: status written {}", value);
        Ok(())
    }

    /// Sets the measurement resolution.
    #[cfg(feature = "resolution-control")]
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Sht1xError<E>> {
        let status = self.fetch_status()?.with_resolution(resolution);
        self.write_status(status)
    }

    /// Reads the measurement resolution from the sensor.
    #[cfg(feature = "resolution-control")]
    pub fn read_resolution(&mut self) -> Result<Resolution, Sht1xError<E>> {
        Ok(self.read_status()?.resolution())
    }

    /// Switches the internal heater.
    #[cfg(feature = "heater-control")]
    pub fn set_heater(&mut self, heater: Heater) -> Result<(), Sht1xError<E>> {
        let status = self.fetch_status()?.with_heater(heater);
        self.write_status(status)
    }

    /// Reads the internal heater state from the sensor.
    #[cfg(feature = "heater-control")]
    pub fn read_heater(&mut self) -> Result<Heater, Sht1xError<E>> {
        Ok(self.read_status()?.heater())
    }

    /// Whether the sensor reports a supply below ~2.47 V.
    pub fn end_of_battery(&mut self) -> Result<bool, Sht1xError<E>> {
        Ok(self.read_status()?.end_of_battery())
    }

    /// Sets the supply voltage of the sensor, which shifts the temperature offset.
    ///
    /// Values outside the 2.5 V to 5 V range are clamped to it. The default is 5 V.
    #[cfg(feature = "voltage-control")]
    pub fn set_supply_voltage(&mut self, volts: f32) {
        self.d1 = conversion::d1_for_voltage(volts);
    }

    /// Runs a single conversion and returns the raw count.
    pub fn measure(&mut self, quantity: Quantity) -> Result<u16, Sht1xError<E>> {
        let command = quantity.command();
        self.transmission_start()?;
        self.write_byte(command.code())?;
        self.wait_for_release()?;
        self.wait_for_data_ready(MEASUREMENT_TIMEOUT_MS)?;
        let raw = self.read_word(command)?;
        trace!("sht1x: {:?} raw {}", quantity, raw);
        Ok(raw)
    }

    /// Measures temperature, then humidity, and converts both.
    ///
    /// The first failure aborts the whole sample, so a temperature that was read
    /// successfully is discarded when the humidity measurement fails.
    pub fn read_sample(&mut self) -> Result<Sample, Sht1xError<E>> {
        let temperature_raw = self.measure(Quantity::Temperature)?;
        let humidity_raw = self.measure(Quantity::Humidity)?;
        Ok(Sample::from_raw(
            temperature_raw,
            humidity_raw,
            self.status.resolution(),
            self.d1(),
        ))
    }

    #[cfg(feature = "voltage-control")]
    fn d1(&self) -> f32 {
        self.d1
    }

    #[cfg(not(feature = "voltage-control"))]
    fn d1(&self) -> f32 {
        conversion::D1_5V
    }

    /// Reads the status register without touching the mirror.
    fn fetch_status(&mut self) -> Result<Status, Sht1xError<E>> {
        self.transmission_start()?;
        self.write_byte(Command::ReadStatus.code())?;
        let status = Status::from(self.read_status_byte()?);
        trace!("sht1x: status read {}", status.bits());
        Ok(status)
    }

    #[cfg(not(feature = "crc"))]
    fn read_status_byte(&mut self) -> Result<u8, Sht1xError<E>> {
        self.read_byte(Ack::Stop)
    }

    #[cfg(feature = "crc")]
    fn read_status_byte(&mut self) -> Result<u8, Sht1xError<E>> {
        let status = self.read_byte(Ack::Continue)?;
        let received = self.read_byte(Ack::Stop)?;
        // The sensor seeds the checksum with the register it is sending.
        Self::verify_checksum(
            Status::from(status),
            Command::ReadStatus,
            &[status],
            received,
        )?;
        Ok(status)
    }

    /// Reads a big-endian word. The checksum byte is skipped by ending the transfer
    /// right after the low byte.
    #[cfg(not(feature = "crc"))]
    fn read_word(&mut self, _command: Command) -> Result<u16, Sht1xError<E>> {
        let msb = self.read_byte(Ack::Continue)?;
        let lsb = self.read_byte(Ack::Stop)?;
        Ok(u16::from_be_bytes([msb, lsb]))
    }

    /// Reads a big-endian word followed by its checksum.
    #[cfg(feature = "crc")]
    fn read_word(&mut self, command: Command) -> Result<u16, Sht1xError<E>> {
        let msb = self.read_byte(Ack::Continue)?;
        let lsb = self.read_byte(Ack::Continue)?;
        let received = self.read_byte(Ack::Stop)?;
        Self::verify_checksum(self.status, command, &[msb, lsb], received)?;
        Ok(u16::from_be_bytes([msb, lsb]))
    }

    #[cfg(feature = "crc")]
    fn verify_checksum(
        status: Status,
        command: Command,
        data: &[u8],
        received: u8,
    ) -> Result<(), Sht1xError<E>> {
        let expected = checksum(status, command.code(), data);
        if expected == received {
            Ok(())
        } else {
            warn!(
                "sht1x: checksum mismatch, expected {} received {}",
                expected, received
            );
            Err(Sht1xError::ChecksumMismatch { expected, received })
        }
    }
}
