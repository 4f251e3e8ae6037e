pub mod crc;
pub mod hash;
pub mod varint;
