//! A chunked growable buffer and a push-style traversal protocol.
//!
//! [`ChunkedBuffer`] appends values into a spine of chunks that grow
//! geometrically and never move, so growth is amortized constant time without
//! ever copying stored values. Reading back goes through random access
//! ([`ChunkedBuffer::at`]), plain iteration, or a [`Traverser`]: a cursor that
//! pushes values into a consumer closure, forward or backward, exhaustively or
//! with early exit.
//!
//! ```rust
//! use core::convert::Infallible;
//! use spinebuf::{ChunkedBuffer, Status, Traverser};
//!
//! let buffer: ChunkedBuffer<i64> = (1..=100).collect();
//!
//! let mut traverser = buffer.traverser();
//! let status = traverser.while_next(|control, value| {
//!     if *value * *value > 50 {
//!         control.exit();
//!     }
//!     Ok::<_, Infallible>(())
//! });
//! assert_eq!(status, Ok(Status::Exited));
//! assert_eq!(traverser.position(), 8);
//!
//! assert!(buffer.traverser().all_match(|v| **v > 0));
//! ```
//!
//! Neither type synchronizes. Traversers borrow their source, which rules out
//! mutating a buffer while one of its traversers is in use.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod options;
mod traverser;

#[cfg(test)]
mod tests;

pub use buffer::{ChunkedBuffer, Values};
pub use error::BufferError;
pub use options::{BufferOptions, DEFAULT_CAPACITY, MAX_CHUNK_POWER, MIN_CHUNK_POWER, MIN_TABLE_LEN};
pub use traverser::{
    Addressable, Cloned, Concat, Control, Cursor, Duplex, DuplexIndexed, Empty, Indexed, Iter,
    Single, Status, Traverser, empty, once,
};
