/// Capacity of the first chunk when no hint is given.
pub const DEFAULT_CAPACITY: usize = 1 << MIN_CHUNK_POWER;

/// Smallest first-chunk power; capacity hints below `2^4` are rounded up.
pub const MIN_CHUNK_POWER: u32 = 4;

/// Largest chunk power. Chunks stop growing once they reach `2^30` slots.
pub const MAX_CHUNK_POWER: u32 = 30;

/// Number of chunk slots reserved in the spine when it is first inflated.
pub const MIN_TABLE_LEN: usize = 8;

/// Construction options for a [`ChunkedBuffer`](crate::ChunkedBuffer).
///
/// # Examples
///
/// ```rust
/// use spinebuf::{BufferOptions, ChunkedBuffer};
///
/// let buffer = ChunkedBuffer::<u8>::with_options(BufferOptions {
///     initial_capacity: 100,
/// });
/// assert_eq!(buffer.capacity(), 128);
/// ```
///
/// # Default
///
/// `initial_capacity` defaults to [`DEFAULT_CAPACITY`].
// Enable serde support for tests and when the optional `serde` feature is
// activated by downstream crates.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Requested number of slots in the first chunk.
    ///
    /// The value is rounded up to the next power of two and clamped to
    /// `[2^MIN_CHUNK_POWER, 2^MAX_CHUNK_POWER]`. Every later chunk is at least
    /// this large, so a generous hint trades memory for fewer chunks.
    ///
    /// # Default
    ///
    /// `16`
    pub initial_capacity: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl BufferOptions {
    /// log2 of the first chunk's capacity.
    #[must_use]
    pub fn initial_chunk_power(&self) -> u32 {
        self.initial_capacity
            .checked_next_power_of_two()
            .map_or(MAX_CHUNK_POWER, usize::trailing_zeros)
            .clamp(MIN_CHUNK_POWER, MAX_CHUNK_POWER)
    }
}

/// Capacity of chunk `index` for a buffer whose first chunk holds
/// `2^initial_power` slots. Chunks 0 and 1 share the base capacity; each
/// later chunk doubles until `2^MAX_CHUNK_POWER`.
#[inline]
pub(crate) fn chunk_capacity(initial_power: u32, index: usize) -> usize {
    let growth = u32::try_from(index.saturating_sub(1)).unwrap_or(u32::MAX);
    1 << initial_power.saturating_add(growth).min(MAX_CHUNK_POWER)
}
