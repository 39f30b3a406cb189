//! The cyclic redundancy check closing every FIT document.

/// Nibble lookup table for the CRC-16 polynomial used by FIT.
const TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Accumulate a slice of bytes into a cyclic redundancy check value.
///
/// Start from zero for a fresh document. Computing over a document including
/// its trailing check value yields zero when the document is intact.
pub fn compute_crc(init: u16, r: &[u8]) -> u16 {
    r.iter().fold(init, |crc, b| {
        let crc = update(crc, b & 0x0F);
        update(crc, b >> 4)
    })
}

fn update(crc: u16, nibble: u8) -> u16 {
    let tmp = TABLE[(crc & 0x0F) as usize];
    ((crc >> 4) & 0x0FFF) ^ tmp ^ TABLE[nibble as usize]
}
