//! Push-style traversal over ordered, randomly addressable sequences.
//!
//! A traverser owns a cursor into a source it borrows, and hands values to a
//! consumer closure instead of returning them. Capabilities are split across
//! traits that a concrete traverser opts into:
//!
//! - [`Traverser`]: forward traversal, the minimum every traverser provides.
//! - [`Indexed`]: consumers also receive the absolute position of each value.
//! - [`Duplex`]: backward traversal toward the low bound.
//! - [`DuplexIndexed`]: backward traversal with positions.
//!
//! Every consumer returns `Result<(), E>`. An error stops the traversal and is
//! returned unchanged; the cursor keeps the progress made before it, counting
//! the value whose consumer failed as visited.
//!
//! The `while_*` family lets a consumer stop early through a [`Control`]
//! handle, and reports how the loop ended as a [`Status`]:
//!
//! ```rust
//! use core::convert::Infallible;
//! use spinebuf::{Cursor, Indexed, Status, Traverser};
//!
//! let values = [3, 5, 8, 13];
//! let mut cursor = Cursor::new(&values[..]);
//! let status = cursor.while_next(|control, value| {
//!     if value % 2 == 0 {
//!         control.exit();
//!     }
//!     Ok::<_, Infallible>(())
//! });
//! assert_eq!(status, Ok(Status::Exited));
//! assert_eq!(cursor.position(), 3);
//!
//! // The cursor resumes where the previous call stopped.
//! let mut rest = vec![];
//! cursor
//!     .for_next_indexed(|index, value| {
//!         rest.push((index, *value));
//!         Ok::<_, Infallible>(())
//!     })
//!     .unwrap();
//! assert_eq!(rest, [(3, 13)]);
//! ```

mod adapters;
mod concat;
mod cursor;
mod empty;

use core::{borrow::Borrow, convert::Infallible};

pub use adapters::{Cloned, Iter};
pub use concat::Concat;
pub use cursor::{Addressable, Cursor, Single, once};
pub use empty::{Empty, empty};

/// How a `while_next`/`while_prev` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The consumer never ran because the cursor was already at its bound.
    Init,
    /// The consumer called [`Control::exit`].
    Exited,
    /// The cursor reached its bound.
    Completed,
}

/// Handle passed to `while_*` consumers to stop the loop after the current
/// value.
#[derive(Debug, Default)]
pub struct Control {
    exited: bool,
}

impl Control {
    /// Stops the loop once the current consumer call returns.
    pub fn exit(&mut self) {
        self.exited = true;
    }

    /// Whether [`exit`](Self::exit) has been called.
    #[must_use]
    pub fn is_exited(&self) -> bool {
        self.exited
    }
}

/// Forward traversal.
pub trait Traverser {
    /// Value handed to consumers.
    type Item;

    /// Consumes the value at the cursor and advances by one.
    ///
    /// Returns `Ok(false)` without calling `consumer` when the cursor is
    /// already at its upper bound.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error. The cursor has moved past the value.
    fn try_next<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(Self::Item) -> Result<(), E>;

    /// Consumes every remaining value.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error; later values are left unvisited.
    fn for_next<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(Self::Item) -> Result<(), E>,
    {
        while self.try_next(&mut consumer)? {}
        Ok(())
    }

    /// Consumes values until the bound is reached or the consumer calls
    /// [`Control::exit`].
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn while_next<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, Self::Item) -> Result<(), E>,
    {
        let mut control = Control::default();
        let mut status = Status::Init;
        while self.try_next(|value| consumer(&mut control, value))? {
            if control.exited {
                return Ok(Status::Exited);
            }
            status = Status::Completed;
        }
        Ok(status)
    }

    /// Rewinds the cursor to its initial position. Returns `false` when the
    /// source cannot be replayed.
    fn reset(&mut self) -> bool;

    /// Whether any remaining value satisfies `predicate`. Stops at the first
    /// match, leaving the cursor just past it.
    fn any_match<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let Ok(status) = self.while_next(|control, value| {
            if predicate(&value) {
                control.exit();
            }
            Ok::<_, Infallible>(())
        });
        status == Status::Exited
    }

    /// Whether every remaining value satisfies `predicate`. Vacuously true
    /// when nothing remains.
    fn all_match<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        !self.any_match(|value| !predicate(value))
    }

    /// Whether no remaining value satisfies `predicate`.
    fn none_match<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        !self.any_match(predicate)
    }

    /// Whether a remaining value equals `needle`.
    fn contains<V>(&mut self, needle: &V) -> bool
    where
        V: PartialEq + ?Sized,
        Self::Item: Borrow<V>,
    {
        self.any_match(|value| Borrow::<V>::borrow(value) == needle)
    }

    /// Converts into a pull-style iterator.
    fn iter(self) -> Iter<Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }

    /// Clones each borrowed value before handing it on.
    fn cloned<'a, U>(self) -> Cloned<Self>
    where
        Self: Sized + Traverser<Item = &'a U>,
        U: Clone + 'a,
    {
        Cloned::new(self)
    }
}

/// Forward traversal that also reports each value's absolute position.
pub trait Indexed: Traverser {
    /// Like [`Traverser::try_next`], passing the position of the value.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error.
    fn try_next_indexed<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(usize, Self::Item) -> Result<(), E>;

    /// Like [`Traverser::for_next`], passing positions.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn for_next_indexed<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(usize, Self::Item) -> Result<(), E>,
    {
        while self.try_next_indexed(&mut consumer)? {}
        Ok(())
    }

    /// Like [`Traverser::while_next`], passing positions.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn while_next_indexed<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, Self::Item) -> Result<(), E>,
    {
        let mut control = Control::default();
        let mut status = Status::Init;
        while self.try_next_indexed(|index, value| consumer(&mut control, index, value))? {
            if control.exited {
                return Ok(Status::Exited);
            }
            status = Status::Completed;
        }
        Ok(status)
    }
}

/// Traversal in both directions.
///
/// Backward steps read the value just below the cursor and move the cursor
/// onto it, so a `try_prev` undoes the preceding `try_next`.
pub trait Duplex: Traverser {
    /// Consumes the value below the cursor and moves back by one.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error. The cursor has moved onto the value.
    fn try_prev<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(Self::Item) -> Result<(), E>;

    /// Consumes every value down to the lower bound, nearest first.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn for_prev<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(Self::Item) -> Result<(), E>,
    {
        while self.try_prev(&mut consumer)? {}
        Ok(())
    }

    /// Backward counterpart of [`Traverser::while_next`].
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn while_prev<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, Self::Item) -> Result<(), E>,
    {
        let mut control = Control::default();
        let mut status = Status::Init;
        while self.try_prev(|value| consumer(&mut control, value))? {
            if control.exited {
                return Ok(Status::Exited);
            }
            status = Status::Completed;
        }
        Ok(status)
    }
}

/// Backward traversal with positions.
pub trait DuplexIndexed: Duplex + Indexed {
    /// Like [`Duplex::try_prev`], passing the position of the value.
    ///
    /// # Errors
    ///
    /// Returns the consumer's error.
    fn try_prev_indexed<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(usize, Self::Item) -> Result<(), E>;

    /// Like [`Duplex::for_prev`], passing positions.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn for_prev_indexed<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(usize, Self::Item) -> Result<(), E>,
    {
        while self.try_prev_indexed(&mut consumer)? {}
        Ok(())
    }

    /// Like [`Duplex::while_prev`], passing positions.
    ///
    /// # Errors
    ///
    /// Returns the first consumer error.
    fn while_prev_indexed<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, Self::Item) -> Result<(), E>,
    {
        let mut control = Control::default();
        let mut status = Status::Init;
        while self.try_prev_indexed(|index, value| consumer(&mut control, index, value))? {
            if control.exited {
                return Ok(Status::Exited);
            }
            status = Status::Completed;
        }
        Ok(status)
    }
}
