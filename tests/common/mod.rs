#![allow(dead_code)]

use freewheel::check::compute_crc;

pub const FILE_ID: u16 = 0;
pub const SESSION: u16 = 18;
pub const LAP: u16 = 19;
pub const RECORD: u16 = 20;
pub const EVENT: u16 = 21;

pub const ENUM: u8 = 0x00;
pub const UINT16: u8 = 0x84;
pub const SINT32: u8 = 0x85;
pub const UINT32: u8 = 0x86;
pub const STRING: u8 = 0x07;

pub const INVALID_SINT32: i32 = i32::MAX;

/// Fields of a `record` definition holding a position and timestamp.
pub const POSITION_FIELDS: [(u8, u8, u8); 3] =
    [(0, 4, SINT32), (1, 4, SINT32), (253, 4, UINT32)];

/// Builder for synthetic FIT documents.
#[derive(Debug, Clone)]
pub struct Document {
    header_size: u8,
    records: Vec<u8>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            header_size: 12,
            records: Vec::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the 14-byte header carrying a header CRC.
    pub fn extended(mut self) -> Self {
        self.header_size = 14;
        self
    }

    /// Append a little endian definition record.
    pub fn define(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.define_with(local, 0, global, fields, None)
    }

    /// Append a big endian definition record.
    pub fn define_big_endian(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.define_with(local, 1, global, fields, None)
    }

    /// Append a definition record with full control over its contents.
    pub fn define_with(
        mut self,
        local: u8,
        architecture: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer: Option<&[(u8, u8, u8)]>,
    ) -> Self {
        let developer_flag = if developer.is_some() { 0x20 } else { 0 };
        self.records.push(0x40 | developer_flag | local);
        self.records.extend([0, architecture]);

        if architecture == 1 {
            self.records.extend(global.to_be_bytes());
        } else {
            self.records.extend(global.to_le_bytes());
        }

        self.records.push(fields.len() as u8);
        for (number, size, base_type) in fields {
            self.records.extend([*number, *size, *base_type]);
        }

        if let Some(developer) = developer {
            self.records.push(developer.len() as u8);
            for (number, size, index) in developer {
                self.records.extend([*number, *size, *index]);
            }
        }

        self
    }

    /// Append a data record with a normal header.
    pub fn data(mut self, local: u8, body: &[u8]) -> Self {
        self.records.push(local);
        self.records.extend_from_slice(body);
        self
    }

    /// Append a data record with a compressed timestamp header.
    pub fn compressed(mut self, local: u8, time_offset: u8, body: &[u8]) -> Self {
        self.records.push(0x80 | (local << 5) | (time_offset & 0x1F));
        self.records.extend_from_slice(body);
        self
    }

    /// Append arbitrary bytes to the record section.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.records.extend_from_slice(bytes);
        self
    }

    /// Serialize the document, with header and trailing CRC.
    pub fn build(&self) -> Vec<u8> {
        let mut r = vec![self.header_size, 0x20];
        r.extend(2132u16.to_le_bytes());
        r.extend((self.records.len() as u32).to_le_bytes());
        r.extend(b".FIT");

        if self.header_size == 14 {
            let crc = compute_crc(0, &r);
            r.extend(crc.to_le_bytes());
        }

        r.extend_from_slice(&self.records);

        let crc = compute_crc(0, &r);
        r.extend(crc.to_le_bytes());

        r
    }
}

/// Body of a data record for [`POSITION_FIELDS`].
pub fn position(lat: i32, long: i32, timestamp: u32) -> Vec<u8> {
    let mut r = Vec::with_capacity(12);
    r.extend(lat.to_le_bytes());
    r.extend(long.to_le_bytes());
    r.extend(timestamp.to_le_bytes());
    r
}

/// Body of a data record holding only a position, given in degrees.
pub fn coordinates(lat: f64, long: f64) -> Vec<u8> {
    let mut r = Vec::with_capacity(8);
    r.extend(semicircles(lat).to_le_bytes());
    r.extend(semicircles(long).to_le_bytes());
    r
}

/// Convert degrees to the nearest semicircle value.
pub fn semicircles(degrees: f64) -> i32 {
    (degrees * (2_147_483_648.0 / 180.0)).round() as i32
}
