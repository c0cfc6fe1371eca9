//! Expected pin and delay transactions for the wire primitives, for driving
//! `embedded-hal-mock` in unit tests.

use embedded_hal_mock::eh1::delay::{CheckedDelay, Transaction as DelayTx};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTx};

use crate::transport::{Ack, SETTLE_US};
#[cfg(feature = "crc")]
use crate::types::Status;

fn level(high: bool) -> PinState {
    if high { PinState::High } else { PinState::Low }
}

/// Transactions expected on DATA, SCK and the delay provider, in order.
#[derive(Default)]
pub(crate) struct Script {
    pub(crate) data: Vec<PinTx>,
    pub(crate) sck: Vec<PinTx>,
    pub(crate) delay: Vec<DelayTx>,
    /// Status register the sensor holds, which seeds response checksums.
    #[cfg_attr(not(feature = "crc"), allow(dead_code))]
    seed: u8,
}

impl Script {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn build(self) -> (PinMock, PinMock, CheckedDelay) {
        (
            PinMock::new(&self.data),
            PinMock::new(&self.sck),
            CheckedDelay::new(&self.delay),
        )
    }

    fn data_set(&mut self, high: bool) {
        self.data.push(PinTx::set(level(high)));
    }

    fn data_get(&mut self, high: bool) {
        self.data.push(PinTx::get(level(high)));
    }

    fn sck_set(&mut self, high: bool) {
        self.sck.push(PinTx::set(level(high)));
    }

    fn settle(&mut self) {
        self.delay.push(DelayTx::delay_us(SETTLE_US));
    }

    fn clock_pulse(&mut self) {
        self.sck_set(true);
        self.settle();
        self.sck_set(false);
        self.settle();
    }

    /// `init`: both lines idle high.
    pub(crate) fn idle(mut self) -> Self {
        self.data_set(true);
        self.sck_set(true);
        self
    }

    pub(crate) fn start(mut self) -> Self {
        self.data_set(true);
        self.settle();
        self.sck_set(true);
        self.settle();
        self.data_set(false);
        self.settle();
        self.sck_set(false);
        self.settle();
        self.sck_set(true);
        self.settle();
        self.data_set(true);
        self.settle();
        self.sck_set(false);
        self.settle();
        self
    }

    pub(crate) fn connection_reset(mut self) -> Self {
        self.data_set(true);
        self.settle();
        for _ in 0..9 {
            self.clock_pulse();
        }
        self.start()
    }

    /// Controller writes `value`; the sensor acknowledges it when `acked`.
    pub(crate) fn write_byte(mut self, value: u8, acked: bool) -> Self {
        for bit in (0..8).rev() {
            self.data_set(value & (1 << bit) != 0);
            self.settle();
            self.clock_pulse();
        }
        self.data_set(true);
        self.settle();
        self.sck_set(true);
        self.settle();
        self.data_get(!acked);
        self.sck_set(false);
        self.settle();
        self
    }

    /// DATA still reads low (the acknowledge) for `held_polls` samples, then the sensor
    /// lets go of it.
    pub(crate) fn released_after(mut self, held_polls: u8) -> Self {
        for _ in 0..held_polls {
            self.data_get(false);
            self.settle();
        }
        self.data_get(true);
        self
    }

    /// DATA stays low through every release sample.
    pub(crate) fn never_released(mut self) -> Self {
        for _ in 0..10 {
            self.data_get(false);
            self.settle();
        }
        self
    }

    /// Sensor shifts out `value`; the controller answers with `ack`.
    pub(crate) fn read_byte(mut self, value: u8, ack: Ack) -> Self {
        self.data_set(true);
        for bit in (0..8).rev() {
            self.sck_set(true);
            self.settle();
            self.data_get(value & (1 << bit) != 0);
            self.sck_set(false);
            self.settle();
        }
        self.data_set(ack == Ack::Stop);
        self.settle();
        self.clock_pulse();
        self.data_set(true);
        self
    }

    /// DATA stays high for `busy_polls` polls, then the sensor pulls it low.
    pub(crate) fn data_ready_after(mut self, busy_polls: u16) -> Self {
        for _ in 0..busy_polls {
            self.data_get(true);
            self.delay.push(DelayTx::delay_ms(1));
        }
        self.data_get(false);
        self
    }

    /// DATA stays high for the whole `timeout_ms` budget.
    pub(crate) fn data_never_ready(mut self, timeout_ms: u16) -> Self {
        for _ in 0..timeout_ms {
            self.data_get(true);
            self.delay.push(DelayTx::delay_ms(1));
        }
        self.data_get(true);
        self
    }

    /// The sensor holds `status` from here on.
    pub(crate) fn assume_status(mut self, status: u8) -> Self {
        self.seed = status;
        self
    }

    pub(crate) fn delay_ms(mut self, ms: u32) -> Self {
        self.delay.push(DelayTx::delay_ms(ms));
        self
    }

    /// Two-byte response to `command`, followed by a checksum when checksums are verified.
    #[cfg(not(feature = "crc"))]
    pub(crate) fn word(self, _command: u8, raw: u16) -> Self {
        let [msb, lsb] = raw.to_be_bytes();
        self.read_byte(msb, Ack::Continue).read_byte(lsb, Ack::Stop)
    }

    #[cfg(feature = "crc")]
    pub(crate) fn word(self, command: u8, raw: u16) -> Self {
        let [msb, lsb] = raw.to_be_bytes();
        let checksum = crate::checksum::checksum(Status::from(self.seed), command, &[msb, lsb]);
        self.read_byte(msb, Ack::Continue)
            .read_byte(lsb, Ack::Continue)
            .read_byte(checksum, Ack::Stop)
    }

    /// Complete status register read returning `status`, which the sensor holds.
    #[cfg(not(feature = "crc"))]
    pub(crate) fn read_status(self, status: u8) -> Self {
        self.assume_status(status)
            .start()
            .write_byte(0x07, true)
            .read_byte(status, Ack::Stop)
    }

    #[cfg(feature = "crc")]
    pub(crate) fn read_status(self, status: u8) -> Self {
        let checksum = crate::checksum::checksum(Status::from(status), 0x07, &[status]);
        self.assume_status(status)
            .start()
            .write_byte(0x07, true)
            .read_byte(status, Ack::Continue)
            .read_byte(checksum, Ack::Stop)
    }

    /// Complete status register write of `value`, which the sensor holds afterwards.
    pub(crate) fn write_status(self, value: u8) -> Self {
        self.start()
            .write_byte(0x06, true)
            .write_byte(value, true)
            .assume_status(value)
    }

    /// Complete measurement of `command` answered with `raw` after `busy_polls` polls.
    pub(crate) fn measurement(self, command: u8, busy_polls: u16, raw: u16) -> Self {
        self.start()
            .write_byte(command, true)
            .released_after(0)
            .data_ready_after(busy_polls)
            .word(command, raw)
    }
}
