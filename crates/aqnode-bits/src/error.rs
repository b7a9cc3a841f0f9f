/// Errors that can occur during field extraction.
#[derive(Debug, thiserror::Error)]
pub enum BitsError {
    /// Sign extension was requested for a width wider than 32 bits.
    #[error("invalid bit width {width} (sign extension supports widths up to 32)")]
    InvalidBitWidth { width: u32 },

    /// A 16-bit field read would run past the end of the buffer.
    #[error("field read at offset {offset} out of bounds (buffer is {len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, BitsError>;
