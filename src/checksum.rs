//! CRC-8 of SHT1x responses.
//!
//! Polynomial x^8 + x^5 + x^4 + 1, processed MSB first over the command byte followed by
//! the response bytes. The register starts from the low nibble of the status register in
//! reverse bit order and the sensor transmits the final value bit-reversed, which maps to
//! `refin = false, refout = true`.

use crc::{Algorithm, Crc};

use crate::types::Status;

const SHT1X_CRC_8: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0x00,
    refin: false,
    refout: true,
    xorout: 0x00,
    check: 0x45,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&SHT1X_CRC_8);

/// Checksum the sensor is expected to send after `command` and `data`, given the status
/// register the sensor held during the transfer.
pub(crate) fn checksum(status: Status, command: u8, data: &[u8]) -> u8 {
    let mut digest = CRC.digest_with_initial((status.bits() & 0x0F).reverse_bits());
    digest.update(&[command]);
    digest.update(data);
    digest.finalize()
}
