use crate::Xorgen;

#[derive(thiserror::Error)]
pub enum Error {
    // std errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // crate errors
    #[error("Cannot open input path: {path}")]
    InputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open header template: {path}")]
    HeaderTemplateOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output path: {path}\nIf input is located on a read-only filesystem, you should specify an output path.")]
    OutputCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input file too small ({0:#x} bytes), unlikely to be an iso/cvm")]
    InputTooSmall(u64),

    #[error("could not detect either CVM or ISO9660 header on input")]
    UnknownFormat,

    #[error("sector {0:#x} is outside of the ciphered descriptor range")]
    SectorOutOfRange(u8),

    #[error("{0} is a reserved xorgen slot")]
    ReservedXorgen(Xorgen),

    #[error("identifier length {length} exceeds the {available} bytes available")]
    IdentifierLength { length: usize, available: usize },

    #[error("header template must be {:#x} bytes, got {0:#x}", super::HEADER_SIZE)]
    HeaderTemplateSize(usize),
}

impl Error {
    /// Process exit code reported by the command line tool
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownFormat => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
