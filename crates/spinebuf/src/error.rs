use thiserror::Error;

/// Errors reported by [`ChunkedBuffer`](crate::ChunkedBuffer) and by cursors
/// opened over an explicit window.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A position outside `[0, count)` was requested.
    #[error("index {index} out of bounds for {count} values")]
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// Number of addressable values at the time of the request.
        count: usize,
    },
    /// The destination of a copy cannot hold every stored value at the
    /// requested offset.
    #[error("destination of length {available} cannot hold {required} values at offset {offset}")]
    DestinationTooSmall {
        /// Offset of the first written slot.
        offset: usize,
        /// Number of values that had to be written.
        required: usize,
        /// Length of the destination slice.
        available: usize,
    },
}
