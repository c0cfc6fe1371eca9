//! Conversion of raw counts into physical units, using the coefficients from the
//! SHT1x datasheet.

use crate::types::Resolution;

/// Temperature offset for a 5 V supply, in °C.
pub const D1_5V: f32 = -40.1;

/// Temperature offset by supply voltage, `(volts, d1)`, sorted by voltage.
#[cfg(feature = "voltage-control")]
const D1_TABLE: [(f32, f32); 5] = [
    (2.5, -39.4),
    (3.0, -39.6),
    (3.5, -39.7),
    (4.0, -39.8),
    (5.0, D1_5V),
];

const T1: f32 = 0.01;

/// Coefficients that depend on the raw count width.
struct Coefficients {
    d2: f32,
    c1: f32,
    c2: f32,
    c3: f32,
    t2: f32,
}

const HIGH_RESOLUTION: Coefficients = Coefficients {
    d2: 0.01,
    c1: -2.0468,
    c2: 0.0367,
    c3: -1.5955e-6,
    t2: 0.000_08,
};

const LOW_RESOLUTION: Coefficients = Coefficients {
    d2: 0.04,
    c1: -2.0468,
    c2: 0.5872,
    c3: -4.0845e-4,
    t2: 0.001_28,
};

fn coefficients(resolution: Resolution) -> &'static Coefficients {
    match resolution {
        Resolution::High => &HIGH_RESOLUTION,
        Resolution::Low => &LOW_RESOLUTION,
    }
}

/// Converts a raw temperature count into degrees Celsius.
///
/// `d1` is the supply-voltage dependent offset, [`D1_5V`] unless the supply has been
/// configured otherwise.
pub fn temperature_celsius(raw: u16, resolution: Resolution, d1: f32) -> f32 {
    d1 + coefficients(resolution).d2 * raw as f32
}

/// Converts degrees Celsius into degrees Fahrenheit.
#[cfg(feature = "fahrenheit")]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converts a raw humidity count into relative humidity in percent, compensated for
/// the temperature the sensor measured alongside it.
///
/// The result is not clamped, so it can leave `0..=100` slightly at the extremes.
pub fn relative_humidity(raw: u16, resolution: Resolution, celsius: f32) -> f32 {
    let k = coefficients(resolution);
    let raw = raw as f32;
    let linear = k.c1 + k.c2 * raw + k.c3 * raw * raw;
    (celsius - 25.0) * (T1 + k.t2 * raw) + linear
}

/// Temperature offset for the given supply voltage.
///
/// Linearly interpolated between the datasheet points and clamped to the 2.5 V to 5 V
/// range they cover.
#[cfg(feature = "voltage-control")]
pub fn d1_for_voltage(volts: f32) -> f32 {
    let (first_v, first_d1) = D1_TABLE[0];
    if volts <= first_v {
        return first_d1;
    }

    for pair in D1_TABLE.windows(2) {
        let (v0, d0) = pair[0];
        let (v1, d1) = pair[1];
        if volts <= v1 {
            return d0 + (d1 - d0) * (volts - v0) / (v1 - v0);
        }
    }

    D1_5V
}
