use thiserror::Error;

/// Reason a hex color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Wrong number of digits after stripping an optional `#`
    #[error("invalid hex color length: expected 6 digits, got {0}")]
    InvalidLength(usize),

    /// A character that is not a hexadecimal digit
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

#[derive(Debug, Error)]
pub enum BrandingError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Pixel buffer size mismatch: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Image too large: {width}x{height} RGBA does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("Cannot recommend themes from an empty palette")]
    EmptyPalette,

    #[error("Invalid color: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
