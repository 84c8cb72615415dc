//! Chunked growable buffer.
//!
//! Values are appended to fixed-capacity chunks. When the chunk being written
//! fills up, a new one is allocated and linked into a table (the spine) rather
//! than reallocating and copying, so a value never moves once written.
//!
//! The table is only built on the first overflow. Until then the buffer is a
//! single chunk and lookups skip the table entirely.
//!
//! Chunk `i` has capacity `2^min(p + max(i, 1) - 1, 30)` where `2^p` is the
//! first chunk's capacity. Chunks 0 and 1 share the base size, after which
//! every chunk doubles, so the number of chunks stays logarithmic in the number
//! of stored values.

use alloc::vec::Vec;
use core::{fmt, iter::Flatten, mem, ops::Index, slice};

use crate::{
    error::BufferError,
    options::{BufferOptions, MIN_TABLE_LEN, chunk_capacity},
    traverser::{Addressable, Cursor, Traverser},
};

#[cfg(feature = "tracing")]
use tracing::trace;

/// A growable sequence of values stored in chunks that never move.
///
/// # Examples
///
/// ```rust
/// use spinebuf::ChunkedBuffer;
///
/// let mut buffer = ChunkedBuffer::new();
/// buffer.insert_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17]);
/// assert_eq!(buffer.count(), 17);
/// assert_eq!(buffer.at(16), Ok(&17));
/// assert_eq!(buffer.capacity(), 32);
/// assert!(buffer.at(17).is_err());
/// ```
pub struct ChunkedBuffer<T> {
    /// The only chunk until the first overflow. Empty and unallocated once the
    /// table has been inflated, since the chunk then lives at `table[0]`.
    first: Vec<T>,
    /// All chunks in order, or empty while uninflated. The last chunk is the
    /// one being written.
    table: Vec<Vec<T>>,
    /// `counts[i]` is the number of values stored in `table[..i]`.
    counts: Vec<usize>,
    initial_power: u32,
}

impl<T> ChunkedBuffer<T> {
    /// Empty buffer with the default first-chunk capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Empty buffer whose first chunk holds at least `capacity` values (within
    /// the clamping rules of [`BufferOptions::initial_capacity`]).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(BufferOptions {
            initial_capacity: capacity,
        })
    }

    /// Empty buffer built from `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        let initial_power = options.initial_chunk_power();
        Self {
            first: Vec::with_capacity(chunk_capacity(initial_power, 0)),
            table: Vec::new(),
            counts: Vec::new(),
            initial_power,
        }
    }

    /// Whether values have spilled past the first chunk.
    #[inline]
    fn is_inflated(&self) -> bool {
        !self.table.is_empty()
    }

    /// Index of the chunk being written.
    #[inline]
    fn tix(&self) -> usize {
        self.table.len().saturating_sub(1)
    }

    /// Number of values stored.
    #[must_use]
    pub fn count(&self) -> usize {
        match (self.counts.last(), self.table.last()) {
            (Some(offset), Some(chunk)) => offset + chunk.len(),
            _ => self.first.len(),
        }
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of values the buffer can hold before allocating another chunk.
    #[must_use]
    pub fn capacity(&self) -> usize {
        let tix = self.tix();
        let offset = self.counts.last().copied().unwrap_or(0);
        offset + chunk_capacity(self.initial_power, tix)
    }

    /// Appends `value`.
    ///
    /// # Time complexity
    ///
    /// Amortized constant time. No previously stored value is moved.
    pub fn insert(&mut self, value: T) {
        let (chunk, _) = self.writable();
        chunk.push(value);
    }

    /// Appends every value of `source`, in order, draining it with
    /// [`Traverser::for_next`].
    pub fn insert_from<S>(&mut self, mut source: S)
    where
        S: Traverser<Item = T>,
    {
        let Ok(()) = source.for_next(|value| {
            self.insert(value);
            Ok::<_, core::convert::Infallible>(())
        });
    }

    /// Appends every value produced by `values`.
    pub fn insert_iter<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value);
        }
    }

    /// Appends values until `values` is exhausted or yields an error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `values`. Everything produced
    /// before it stays in the buffer.
    pub fn try_insert_iter<I, E>(&mut self, values: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<T, E>>,
    {
        for value in values {
            self.insert(value?);
        }
        Ok(())
    }

    /// The value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] if `index >= self.count()`.
    ///
    /// # Time complexity
    ///
    /// Linear in the number of chunks, which is logarithmic in the count.
    pub fn at(&self, index: usize) -> Result<&T, BufferError> {
        self.get(index).ok_or(BufferError::IndexOutOfBounds {
            index,
            count: self.count(),
        })
    }

    /// The value at `index`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if !self.is_inflated() {
            return self.first.get(index);
        }
        if index >= self.count() {
            return None;
        }
        // Offsets are increasing, so the first chunk whose end lies past
        // `index` is the one holding it.
        self.table
            .iter()
            .zip(&self.counts)
            .find(|(chunk, offset)| index < *offset + chunk.len())
            .and_then(|(chunk, offset)| chunk.get(index - offset))
    }

    /// Drops every value, releasing all chunks except the first.
    ///
    /// Afterwards the buffer is indistinguishable from a freshly constructed
    /// one with the same options.
    pub fn clear(&mut self) {
        if self.is_inflated() {
            #[cfg(feature = "tracing")]
            trace!(chunks = self.table.len(), count = self.count(), "releasing chunk table");
            let table = mem::take(&mut self.table);
            self.counts = Vec::new();
            if let Some(first) = table.into_iter().next() {
                self.first = first;
            }
        }
        self.first.clear();
    }

    /// Copies every value, in order, into `dst` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::DestinationTooSmall`] when
    /// `dst[offset..offset + self.count()]` does not exist. `dst` is left
    /// untouched in that case.
    pub fn copy_to(&self, dst: &mut [T], offset: usize) -> Result<(), BufferError>
    where
        T: Clone,
    {
        let required = self.count();
        let fits = offset
            .checked_add(required)
            .is_some_and(|end| end <= dst.len());
        if !fits {
            return Err(BufferError::DestinationTooSmall {
                offset,
                required,
                available: dst.len(),
            });
        }
        let mut at = offset;
        for chunk in self.chunks() {
            dst[at..at + chunk.len()].clone_from_slice(chunk);
            at += chunk.len();
        }
        Ok(())
    }

    /// Copies every value into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.count());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Duplex, indexed traverser over `[0, count)` that reads through
    /// [`at`](Self::at).
    ///
    /// The traverser borrows the buffer, so no insert or clear can happen
    /// while it is alive.
    #[must_use]
    pub fn traverser(&self) -> Cursor<&Self> {
        Cursor::new(self)
    }

    /// Iterator over the stored values, walking the chunks directly.
    pub fn iter(&self) -> Values<'_, T> {
        Values {
            inner: self.spine().iter().flatten(),
        }
    }

    /// Every allocated chunk, in order.
    fn spine(&self) -> &[Vec<T>] {
        if self.is_inflated() {
            &self.table
        } else {
            slice::from_ref(&self.first)
        }
    }

    /// Stored values, one slice per chunk, in order.
    fn chunks(&self) -> impl Iterator<Item = &[T]> {
        self.spine().iter().map(Vec::as_slice)
    }

    /// The chunk being written, with at least one free slot, and its number
    /// of free slots. Grows the buffer when the current chunk is full.
    fn writable(&mut self) -> (&mut Vec<T>, usize) {
        let tix = self.tix();
        let capacity = chunk_capacity(self.initial_power, tix);
        let filled = if self.is_inflated() {
            self.table[tix].len()
        } else {
            self.first.len()
        };
        if filled == capacity {
            self.grow();
        }
        let capacity = chunk_capacity(self.initial_power, self.tix());
        let chunk = match self.table.last_mut() {
            Some(chunk) => chunk,
            None => &mut self.first,
        };
        let room = capacity - chunk.len();
        (chunk, room)
    }

    /// Links a new chunk after the current (full) one, inflating the table on
    /// first use.
    fn grow(&mut self) {
        if !self.is_inflated() {
            let mut table = Vec::with_capacity(MIN_TABLE_LEN);
            let mut counts = Vec::with_capacity(MIN_TABLE_LEN);
            table.push(mem::take(&mut self.first));
            counts.push(0);
            self.table = table;
            self.counts = counts;
            #[cfg(feature = "tracing")]
            trace!(table_len = MIN_TABLE_LEN, "inflated chunk table");
        }
        let tix = self.tix();
        let offset = self.counts[tix] + self.table[tix].len();
        let capacity = chunk_capacity(self.initial_power, tix + 1);
        self.table.push(Vec::with_capacity(capacity));
        self.counts.push(offset);
        #[cfg(feature = "tracing")]
        trace!(chunk = tix + 1, capacity, offset, "allocated chunk");
    }

    /// Start address of every allocated chunk, in order.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn chunk_addresses(&self) -> Vec<*const T> {
        self.chunks().map(<[T]>::as_ptr).collect()
    }

    /// `(offset, len, capacity)` of every chunk, in order.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn debug_layout(&self) -> Vec<(usize, usize, usize)> {
        if !self.is_inflated() {
            return alloc::vec![(0, self.first.len(), chunk_capacity(self.initial_power, 0))];
        }
        self.table
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(index, (chunk, offset))| {
                (*offset, chunk.len(), chunk_capacity(self.initial_power, index))
            })
            .collect()
    }
}

impl<T: Clone> ChunkedBuffer<T> {
    /// Appends a copy of every value in `values`, in order.
    ///
    /// Values are copied a chunk-sized run at a time; a new chunk is only
    /// linked once the current one is full.
    pub fn insert_slice(&mut self, values: &[T]) {
        let mut rest = values;
        while !rest.is_empty() {
            let (chunk, room) = self.writable();
            let (now, later) = rest.split_at(room.min(rest.len()));
            chunk.extend_from_slice(now);
            rest = later;
        }
    }
}

impl<T> Default for ChunkedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ChunkedBuffer<T> {
    fn clone(&self) -> Self {
        let mut copy = Self {
            first: Vec::with_capacity(chunk_capacity(self.initial_power, 0)),
            table: Vec::new(),
            counts: Vec::new(),
            initial_power: self.initial_power,
        };
        for chunk in self.chunks() {
            copy.insert_slice(chunk);
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for ChunkedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ChunkedBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ChunkedBuffer<T> {}

impl<T> Index<usize> for ChunkedBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> Extend<T> for ChunkedBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_iter(iter);
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for ChunkedBuffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_iter(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for ChunkedBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.insert_iter(iter);
        buffer
    }
}

impl<'a, T> IntoIterator for &'a ChunkedBuffer<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    fn into_iter(self) -> Values<'a, T> {
        self.iter()
    }
}

impl<'a, T> Addressable for &'a ChunkedBuffer<T> {
    type Item = &'a T;

    fn len(&self) -> usize {
        self.count()
    }

    fn get(&self, index: usize) -> Option<&'a T> {
        self.at(index).ok()
    }
}

/// Iterator over the values of a [`ChunkedBuffer`], front to back.
#[derive(Debug, Clone)]
pub struct Values<'a, T> {
    inner: Flatten<slice::Iter<'a, Vec<T>>>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Values<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        format,
        string::{String, ToString},
        vec,
        vec::Vec,
    };
    use core::convert::Infallible;

    use rstest::rstest;

    use super::*;
    use crate::{
        options::{DEFAULT_CAPACITY, MAX_CHUNK_POWER},
        traverser::{Duplex, DuplexIndexed, Indexed, Status, once},
    };

    fn seventeen() -> ChunkedBuffer<i32> {
        let mut buffer = ChunkedBuffer::new();
        buffer.insert_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17]);
        buffer
    }

    #[test]
    fn insert_get_one_item() {
        let mut sut: ChunkedBuffer<String> = ChunkedBuffer::new();
        assert_eq!(sut.count(), 0);
        assert!(sut.is_empty());
        sut.insert(String::from("hello world"));
        assert_eq!(sut.count(), 1);
        assert!(!sut.is_empty());
        assert_eq!(sut.at(0).unwrap(), "hello world");
        assert_eq!(
            sut.at(10),
            Err(BufferError::IndexOutOfBounds {
                index: 10,
                count: 1
            })
        );
    }

    #[test]
    fn seventeen_values_cross_a_chunk_boundary() {
        let buffer = seventeen();
        assert_eq!(
            buffer.to_vec(),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17]
        );
        assert_eq!(buffer.at(16), Ok(&17));
        assert_eq!(buffer.at(15), Ok(&16));
        assert_eq!(buffer.capacity(), 32);
        assert!(buffer.is_inflated());
        assert_eq!(buffer.debug_layout(), [(0, 16, 16), (16, 1, 16)]);
    }

    #[test]
    fn single_chunk_stays_uninflated() {
        let mut buffer = ChunkedBuffer::new();
        for value in 0..DEFAULT_CAPACITY {
            buffer.insert(value);
        }
        assert!(!buffer.is_inflated());
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
        buffer.insert(DEFAULT_CAPACITY);
        assert!(buffer.is_inflated());
        assert_eq!(buffer.capacity(), 2 * DEFAULT_CAPACITY);
    }

    #[test]
    fn chunk_capacities_double_after_the_second() {
        let buffer: ChunkedBuffer<u32> = (0..16 + 16 + 32 + 64 + 1).collect();
        assert_eq!(
            buffer.debug_layout(),
            [(0, 16, 16), (16, 16, 16), (32, 32, 32), (64, 64, 64), (128, 1, 128)]
        );
        assert_eq!(buffer.capacity(), 256);
        for index in 0..buffer.count() {
            assert_eq!(buffer.at(index), Ok(&u32::try_from(index).unwrap()));
        }
    }

    #[test]
    fn chunks_never_move() {
        let mut buffer = ChunkedBuffer::<u64>::new();
        buffer.insert_iter(0..40);
        let before = buffer.chunk_addresses();
        assert_eq!(before.len(), 3);
        buffer.insert_iter(40..100_000);
        let after = buffer.chunk_addresses();
        assert!(after.len() > before.len());
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(buffer.at(39), Ok(&39));
    }

    #[test]
    fn table_grows_past_its_initial_length() {
        let buffer: ChunkedBuffer<u8> = core::iter::repeat_n(7, 1 << 14).collect();
        // 16 + 16 + 32 + ... + 8192 is exactly 2^14, in eleven chunks.
        assert_eq!(buffer.capacity(), 1 << 14);
        assert_eq!(buffer.debug_layout().len(), 11);
        assert!(buffer.table.len() > MIN_TABLE_LEN);
        assert_eq!(buffer.count(), 1 << 14);
        assert!(buffer.iter().all(|v| *v == 7));
    }

    #[rstest]
    #[case(0, 16)]
    #[case(16, 16)]
    #[case(17, 32)]
    #[case(1000, 1024)]
    fn with_capacity_rounds_up(#[case] requested: usize, #[case] capacity: usize) {
        let buffer = ChunkedBuffer::<bool>::with_capacity(requested);
        assert_eq!(buffer.capacity(), capacity);
        assert!(buffer.first.capacity() >= capacity);
    }

    #[test]
    fn large_power_is_clamped() {
        let options = BufferOptions {
            initial_capacity: usize::MAX,
        };
        assert_eq!(options.initial_chunk_power(), MAX_CHUNK_POWER);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(16)]
    #[case(17)]
    #[case(500)]
    fn out_of_bounds_at_count(#[case] n: usize) {
        let buffer: ChunkedBuffer<usize> = (0..n).collect();
        assert_eq!(
            buffer.at(n),
            Err(BufferError::IndexOutOfBounds { index: n, count: n })
        );
        assert_eq!(
            buffer.at(usize::MAX).unwrap_err().to_string(),
            format!("index {} out of bounds for {n} values", usize::MAX)
        );
        assert!(buffer.get(n).is_none());
    }

    #[test]
    #[should_panic(expected = "index 2 out of bounds for 2 values")]
    fn index_out_of_bounds_panics() {
        let buffer: ChunkedBuffer<i32> = [10, 20].into_iter().collect();
        let _ = buffer[2];
    }

    #[test]
    fn index_reads_across_chunks() {
        let buffer = seventeen();
        assert_eq!(buffer[0], 1);
        assert_eq!(buffer[16], 17);
    }

    #[test]
    fn clear_and_reuse_ints() {
        let mut sut: ChunkedBuffer<i32> = ChunkedBuffer::new();
        let first_chunk = sut.chunk_addresses()[0];
        sut.insert_iter(0..512);
        assert_eq!(sut.count(), 512);
        sut.clear();
        assert_eq!(sut.count(), 0);
        assert_eq!(sut.capacity(), DEFAULT_CAPACITY);
        assert!(!sut.is_inflated());
        assert_eq!(sut.chunk_addresses(), [first_chunk]);
        sut.insert_iter(0..512);
        for idx in 0..512 {
            assert_eq!(sut.at(idx), Ok(&i32::try_from(idx).unwrap()));
        }
    }

    #[test]
    fn clear_matches_fresh_buffer() {
        let mut sut: ChunkedBuffer<String> = ChunkedBuffer::with_capacity(40);
        sut.clear();
        assert!(sut.is_empty());
        assert_eq!(sut.capacity(), 64);

        sut.insert_iter((0..200).map(|n| n.to_string()));
        sut.clear();
        sut.clear();

        let mut fresh = ChunkedBuffer::<String>::with_capacity(40);
        assert_eq!(sut, fresh);
        assert_eq!(sut.capacity(), fresh.capacity());
        for n in 0..100 {
            sut.insert(n.to_string());
            fresh.insert(n.to_string());
        }
        assert_eq!(sut.debug_layout(), fresh.debug_layout());
        assert_eq!(sut, fresh);
    }

    #[test]
    fn insert_slice_fills_before_growing() {
        let mut buffer = ChunkedBuffer::new();
        buffer.insert_slice(&[0_u16; 10]);
        buffer.insert_slice(&[1_u16; 30]);
        assert_eq!(buffer.debug_layout(), [(0, 16, 16), (16, 16, 16), (32, 8, 32)]);
        assert_eq!(buffer.iter().filter(|v| **v == 0).count(), 10);
        assert_eq!(buffer.at(9), Ok(&0));
        assert_eq!(buffer.at(10), Ok(&1));
        buffer.insert_slice(&[]);
        assert_eq!(buffer.count(), 40);
    }

    #[test]
    fn insert_from_traverser_preserves_order() {
        let source = seventeen();
        let mut copy = ChunkedBuffer::new();
        copy.insert_from(source.traverser().cloned());
        copy.insert_from(once(18));
        assert_eq!(copy.count(), 18);
        assert_eq!(copy.at(17), Ok(&18));
        assert_eq!(&copy.to_vec()[..17], &source.to_vec()[..]);
    }

    #[test]
    fn try_insert_iter_keeps_prefix() {
        let mut buffer = ChunkedBuffer::new();
        let values = vec![Ok(1), Ok(2), Err("bad"), Ok(4)];
        assert_eq!(buffer.try_insert_iter(values), Err("bad"));
        assert_eq!(buffer.to_vec(), [1, 2]);
        assert_eq!(buffer.try_insert_iter([Ok::<_, &str>(3)]), Ok(()));
        assert_eq!(buffer.to_vec(), [1, 2, 3]);
    }

    #[test]
    fn extend_by_reference() {
        let mut buffer = ChunkedBuffer::<f64>::new();
        buffer.extend(&[1.5, 2.5]);
        buffer.extend([3.5]);
        assert_eq!(buffer.to_vec(), [1.5, 2.5, 3.5]);
    }

    #[test]
    fn copy_to_with_offset() {
        let buffer = seventeen();
        let mut dst = vec![0; 20];
        buffer.copy_to(&mut dst, 2).unwrap();
        assert_eq!(&dst[..3], &[0, 0, 1]);
        assert_eq!(dst[18], 17);
        assert_eq!(dst[19], 0);
    }

    #[rstest]
    #[case(17, 1)]
    #[case(10, 0)]
    #[case(20, 4)]
    #[case(20, usize::MAX)]
    fn copy_to_rejects_short_destination(#[case] len: usize, #[case] offset: usize) {
        let buffer = seventeen();
        let mut dst = vec![-1; len];
        assert_eq!(
            buffer.copy_to(&mut dst, offset),
            Err(BufferError::DestinationTooSmall {
                offset,
                required: 17,
                available: len
            })
        );
        assert!(dst.iter().all(|v| *v == -1));
    }

    #[test]
    fn copy_empty_buffer_anywhere_in_range() {
        let buffer = ChunkedBuffer::<i32>::new();
        let mut dst = [9; 3];
        assert_eq!(buffer.copy_to(&mut dst, 3), Ok(()));
        assert_eq!(dst, [9; 3]);
    }

    #[test]
    fn traverser_walks_both_ways() {
        let buffer = seventeen();
        let mut traverser = buffer.traverser();
        let mut forward = Vec::new();
        traverser
            .for_next(|v| {
                forward.push(*v);
                Ok::<_, Infallible>(())
            })
            .unwrap();
        assert_eq!(forward, buffer.to_vec());

        let mut backward = Vec::new();
        traverser
            .for_prev_indexed(|index, v| {
                assert_eq!(buffer.at(index), Ok(v));
                backward.push(*v);
                Ok::<_, Infallible>(())
            })
            .unwrap();
        forward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn traverser_early_exit() {
        let buffer: ChunkedBuffer<i32> = (0..50).collect();
        let mut traverser = buffer.traverser();
        let status = traverser.while_next_indexed(|control, _, v| {
            if *v == 20 {
                control.exit();
            }
            Ok::<_, Infallible>(())
        });
        assert_eq!(status, Ok(Status::Exited));
        assert_eq!(traverser.position(), 21);

        let status = traverser.while_next(|_, v| if *v < 0 { Err(*v) } else { Ok(()) });
        assert_eq!(status, Ok(Status::Completed));
        assert_eq!(traverser.remaining(), 0);

        assert!(traverser.reset());
        assert!(traverser.contains(&49_i32));
        assert_eq!(traverser.while_prev(|_, _| Ok::<_, Infallible>(())), Ok(Status::Completed));
        assert_eq!(traverser.try_prev(|_| Ok::<_, Infallible>(())), Ok(false));
    }

    #[test]
    fn empty_buffer_traverser_is_init() {
        let buffer = ChunkedBuffer::<u8>::new();
        assert_eq!(
            buffer.at(0),
            Err(BufferError::IndexOutOfBounds { index: 0, count: 0 })
        );
        let mut traverser = buffer.traverser();
        assert_eq!(traverser.while_next(|_, _| Ok::<_, Infallible>(())), Ok(Status::Init));
        assert_eq!(traverser.try_next_indexed(|_, _| Ok::<_, Infallible>(())), Ok(false));
    }

    #[test]
    fn iter_runs_both_ends() {
        let buffer = seventeen();
        let mut values = buffer.iter();
        assert_eq!(values.next(), Some(&1));
        assert_eq!(values.next_back(), Some(&17));
        let rest: Vec<i32> = values.rev().copied().collect();
        assert_eq!(rest.len(), 15);
        assert_eq!(rest[..2], [16, 15]);
        assert_eq!((&buffer).into_iter().count(), 17);
    }

    #[test]
    fn clone_preserves_layout() {
        let buffer: ChunkedBuffer<String> = (0..70).map(|n| format!("v{n}")).collect();
        let copy = buffer.clone();
        assert_eq!(copy, buffer);
        assert_eq!(copy.debug_layout(), buffer.debug_layout());
        assert_ne!(copy.chunk_addresses(), buffer.chunk_addresses());
    }

    #[test]
    fn debug_lists_values() {
        let buffer: ChunkedBuffer<char> = "abc".chars().collect();
        assert_eq!(format!("{buffer:?}"), "['a', 'b', 'c']");
    }

    #[test]
    fn zero_sized_values_use_chunk_geometry() {
        let mut buffer = ChunkedBuffer::new();
        buffer.insert_iter(core::iter::repeat_n((), 33));
        assert_eq!(buffer.count(), 33);
        assert_eq!(buffer.capacity(), 64);
        assert_eq!(buffer.at(32), Ok(&()));
    }
}
