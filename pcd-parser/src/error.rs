use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("buffer holds {actual} bytes but the public header needs {required}")]
    HeaderTooShort { actual: usize, required: usize },
    #[error("invalid file signature {found:?}, expected \"LASF\"")]
    InvalidSignature { found: [u8; 4] },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid LAS format: {0}")]
    Format(#[from] FormatError),
    #[error(
        "{count} point records of {stride} bytes starting at offset {offset} \
         run past the end of the {available}-byte buffer"
    )]
    TruncatedData {
        offset: u32,
        count: u32,
        stride: usize,
        available: usize,
    },
}
