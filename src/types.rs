//! Commands, settings and the status register of the SHT1x.

use core::fmt;

/// Command bytes understood by the sensor.
///
/// Every command is three address bits (always `000`) followed by five command bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Command {
    MeasureTemperature = 0x03,
    MeasureHumidity = 0x05,
    WriteStatus = 0x06,
    ReadStatus = 0x07,
    SoftReset = 0x1E,
}

impl Command {
    pub(crate) fn code(self) -> u8 {
        self as u8
    }
}

/// The physical quantity a single measurement converts.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature, 14-bit or 12-bit raw count.
    Temperature,
    /// Relative humidity, 12-bit or 8-bit raw count.
    Humidity,
}

impl Quantity {
    pub(crate) fn command(self) -> Command {
        match self {
            Quantity::Temperature => Command::MeasureTemperature,
            Quantity::Humidity => Command::MeasureHumidity,
        }
    }
}

/// Measurement resolution.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    /// 12-bit temperature and 8-bit humidity. Faster conversions, useful for
    /// high speed or extreme low power applications.
    Low,
    /// 14-bit temperature and 12-bit humidity. Power-on default.
    #[default]
    High,
}

/// Internal heater state.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heater {
    /// Heater off. Power-on default.
    #[default]
    Off,
    /// Heater on. Raises the sensor temperature by roughly 5-10 °C.
    On,
}

/// Content of the status register.
///
/// | bit | meaning                                  | access |
/// |-----|------------------------------------------|--------|
/// | 6   | end of battery (VDD below ~2.47 V)       | R      |
/// | 2   | heater                                   | R/W    |
/// | 1   | no reload from OTP                       | R/W    |
/// | 0   | low resolution (12-bit T / 8-bit RH)     | R/W    |
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    const LOW_RESOLUTION: u8 = 1 << 0;
    const NO_OTP_RELOAD: u8 = 1 << 1;
    const HEATER: u8 = 1 << 2;
    const END_OF_BATTERY: u8 = 1 << 6;
    const WRITABLE: u8 = Self::LOW_RESOLUTION | Self::NO_OTP_RELOAD | Self::HEATER;

    /// Raw register value.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Resolution selected by bit 0.
    pub fn resolution(self) -> Resolution {
        if self.0 & Self::LOW_RESOLUTION != 0 {
            Resolution::Low
        } else {
            Resolution::High
        }
    }

    /// Heater state selected by bit 2.
    pub fn heater(self) -> Heater {
        if self.0 & Self::HEATER != 0 {
            Heater::On
        } else {
            Heater::Off
        }
    }

    /// Whether calibration data is skipped on each measurement.
    pub fn no_otp_reload(self) -> bool {
        self.0 & Self::NO_OTP_RELOAD != 0
    }

    /// Whether the supply voltage has dropped below ~2.47 V.
    pub fn end_of_battery(self) -> bool {
        self.0 & Self::END_OF_BATTERY != 0
    }

    #[cfg_attr(not(feature = "resolution-control"), allow(dead_code))]
    pub(crate) fn with_resolution(self, resolution: Resolution) -> Self {
        match resolution {
            Resolution::Low => Self(self.0 | Self::LOW_RESOLUTION),
            Resolution::High => Self(self.0 & !Self::LOW_RESOLUTION),
        }
    }

    #[cfg_attr(not(feature = "heater-control"), allow(dead_code))]
    pub(crate) fn with_heater(self, heater: Heater) -> Self {
        match heater {
            Heater::On => Self(self.0 | Self::HEATER),
            Heater::Off => Self(self.0 & !Self::HEATER),
        }
    }

    /// The byte sent with a write-status command. Read-only bits are masked off.
    pub(crate) fn writable_bits(self) -> u8 {
        self.0 & Self::WRITABLE
    }
}

impl From<u8> for Status {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status {{ 0x{:02x}; {:?} resolution, heater {:?}",
            self.0,
            self.resolution(),
            self.heater()
        )?;
        if self.no_otp_reload() {
            write!(f, ", no_otp_reload")?;
        }
        if self.end_of_battery() {
            write!(f, ", end_of_battery")?;
        }
        write!(f, " }}")
    }
}
