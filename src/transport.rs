//! Bit-level signaling on the SCK and DATA lines.
//!
//! DATA is open-drain: driving it high releases the line so the sensor can pull it low,
//! which is how the sensor acknowledges bytes and shifts out data.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::error::Sht1xError;
use crate::macros::warn;
use crate::sht1x::Sht1x;

/// Time (in microseconds) each line level is held before the next transition.
pub(crate) const SETTLE_US: u32 = 2;

/// SCK pulses in a connection reset. The sensor needs at least 9 with DATA high.
const RESET_PULSES: u8 = 9;

/// Samples (one per settle time) allowed for the sensor to let go of DATA after it
/// acknowledged a measurement command.
const RELEASE_POLLS: u8 = 10;

/// Level the controller drives after receiving a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ack {
    /// DATA low: another byte is expected.
    Continue,
    /// DATA high: end the transfer.
    Stop,
}

impl<DATA, SCK, D, E> Sht1x<DATA, SCK, D>
where
    DATA: InputPin<Error = E> + OutputPin<Error = E>,
    SCK: OutputPin<Error = E>,
    D: DelayNs,
{
    fn settle(&mut self) {
        self.delay.delay_us(SETTLE_US);
    }

    /// Raises SCK, then lowers it again.
    fn clock_pulse(&mut self) -> Result<(), Sht1xError<E>> {
        self.sck.set_high()?;
        self.settle();
        self.sck.set_low()?;
        self.settle();
        Ok(())
    }

    /// Sends the transmission start pattern: DATA falls while SCK is high, then rises
    /// again during the following SCK high phase.
    pub(crate) fn transmission_start(&mut self) -> Result<(), Sht1xError<E>> {
        self.data.set_high()?;
        self.settle();
        self.sck.set_high()?;
        self.settle();
        self.data.set_low()?;
        self.settle();
        self.sck.set_low()?;
        self.settle();
        self.sck.set_high()?;
        self.settle();
        self.data.set_high()?;
        self.settle();
        self.sck.set_low()?;
        self.settle();
        Ok(())
    }

    /// Clocks the sensor out of any half-finished transfer and starts a new
    /// transmission. The status register is left untouched.
    pub(crate) fn connection_reset(&mut self) -> Result<(), Sht1xError<E>> {
        self.data.set_high()?;
        self.settle();
        for _ in 0..RESET_PULSES {
            self.clock_pulse()?;
        }
        self.transmission_start()
    }

    /// Shifts `value` out MSB first and checks that the sensor acknowledges it on the
    /// ninth clock.
    pub(crate) fn write_byte(&mut self, value: u8) -> Result<(), Sht1xError<E>> {
        for bit in (0..8).rev() {
            if value & (1 << bit) != 0 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.settle();
            self.clock_pulse()?;
        }

        self.data.set_high()?;
        self.settle();
        self.sck.set_high()?;
        self.settle();
        let acknowledged = self.data.is_low()?;
        self.sck.set_low()?;
        self.settle();

        if acknowledged {
            Ok(())
        } else {
            warn!("sht1x: byte {} not acknowledged", value);
            Err(Sht1xError::NoAcknowledge)
        }
    }

    /// Shifts a byte in MSB first, then answers with `ack` on the ninth clock and
    /// releases DATA.
    pub(crate) fn read_byte(&mut self, ack: Ack) -> Result<u8, Sht1xError<E>> {
        self.data.set_high()?;

        let mut byte: u8 = 0;
        for _ in 0..8 {
            self.sck.set_high()?;
            self.settle();
            byte = (byte << 1) | u8::from(self.data.is_high()?);
            self.sck.set_low()?;
            self.settle();
        }

        match ack {
            Ack::Continue => self.data.set_low()?,
            Ack::Stop => self.data.set_high()?,
        }
        self.settle();
        self.clock_pulse()?;
        self.data.set_high()?;

        Ok(byte)
    }

    /// Waits for the sensor to release DATA after the acknowledge clock.
    ///
    /// Until then a low DATA line is still the acknowledge, not a finished conversion.
    pub(crate) fn wait_for_release(&mut self) -> Result<(), Sht1xError<E>> {
        for _ in 0..RELEASE_POLLS {
            if self.data.is_high()? {
                return Ok(());
            }
            self.settle();
        }
        warn!("sht1x: DATA still held low after acknowledge");
        Err(Sht1xError::Timeout)
    }

    /// Polls DATA until the sensor pulls it low to signal a finished conversion.
    ///
    /// DATA is sampled once immediately and once after every millisecond of the
    /// budget, so a `timeout_ms` of 0 still catches a conversion that is already done.
    pub(crate) fn wait_for_data_ready(&mut self, timeout_ms: u16) -> Result<(), Sht1xError<E>> {
        let mut remaining = timeout_ms;
        loop {
            if self.data.is_low()? {
                return Ok(());
            }
            if remaining == 0 {
                warn!("sht1x: no data ready after {} ms", timeout_ms);
                return Err(Sht1xError::Timeout);
            }
            remaining -= 1;
            self.delay.delay_ms(1);
        }
    }
}
