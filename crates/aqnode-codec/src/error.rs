use aqnode_bits::BitsError;

/// Errors that can occur during frame decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The uplink payload is shorter than the fixed 12-byte frame layout.
    #[error("truncated frame ({len} bytes, need at least 12)")]
    TruncatedFrame { len: usize },

    /// A field extraction failed.
    #[error("field extraction error: {0}")]
    Bits(#[from] BitsError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
