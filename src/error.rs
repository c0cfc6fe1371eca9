use core::fmt;

/// Possible errors from the SHT1x driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Sht1xError<E> {
    /// The sensor did not pull DATA low to acknowledge a byte.
    NoAcknowledge,
    /// The sensor did not signal the end of a conversion within the time budget.
    Timeout,
    /// The checksum sent by the sensor did not match the received data.
    #[cfg(feature = "crc")]
    ChecksumMismatch {
        /// Checksum computed over the command and the received data.
        expected: u8,
        /// Checksum byte sent by the sensor.
        received: u8,
    },
    /// Error from one of the GPIO pins.
    PinError(E),
}

impl<E> From<E> for Sht1xError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E> fmt::Display for Sht1xError<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sht1xError::NoAcknowledge => write!(f, "sensor did not acknowledge"),
            Sht1xError::Timeout => write!(f, "timed out waiting for the measurement"),
            #[cfg(feature = "crc")]
            Sht1xError::ChecksumMismatch { expected, received } => write!(
                f,
                "checksum mismatch: expected {expected:#04x}, received {received:#04x}"
            ),
            Sht1xError::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}
