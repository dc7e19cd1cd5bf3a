mod cipher;
mod error;
mod ext;
mod header;
mod iv;
mod table;
mod transcode;
mod xorgen;

pub use {
    cipher::*, error::*, ext::*, header::*, iv::*, table::*, transcode::*, xorgen::*,
};

/// ISO9660 logical sector size
pub const SECTOR_SIZE: usize = 0x800;

/// Sectors occupied by the CVM header in front of the image
pub const HEADER_SECTORS: usize = 3;

/// Byte length of the CVM header
pub const HEADER_SIZE: usize = HEADER_SECTORS * SECTOR_SIZE;

/// Volume descriptor sectors which are ciphered inside a container
pub const DESCRIPTOR_SECTORS: std::ops::RangeInclusive<u8> = 0x10..=0x14;

/// "CVMH" read as a little endian u32 at offset 0
pub const CVM_MAGIC: u32 = 0x484D5643;

/// Type byte 1 followed by "CD0" read as a little endian u32 at sector 0x10
pub const ISO_MAGIC: u32 = 0x30444301;

/// Inputs smaller than this are unlikely to be an iso or cvm
pub const MIN_INPUT_SIZE: u64 = 0x10000;

/// Product code the IV is derived from unless overridden
pub const PRODUCT_CODE: &str = "AKAIITO_DEMO";

/// A single sector buffer
pub type Sector = [u8; SECTOR_SIZE];

#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display)]
pub enum Direction {
    /// .iso to .cvm
    #[strum(to_string = "ENCODING")]
    Encode,
    /// .cvm to .iso
    #[strum(to_string = "DECODING")]
    Decode,
}

impl Direction {
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::Encode => "cvm",
            Direction::Decode => "iso",
        }
    }

    /// Output path next to the input with the extension appended to the full file name
    pub fn output_path(self, input: &std::path::Path) -> std::path::PathBuf {
        let mut path = input.as_os_str().to_owned();
        path.push(".");
        path.push(self.output_extension());
        path.into()
    }
}
