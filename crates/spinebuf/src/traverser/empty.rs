use core::{fmt, marker::PhantomData};

use crate::traverser::{Control, Duplex, DuplexIndexed, Indexed, Status, Traverser};

/// The traverser with nothing to traverse.
///
/// Every step returns `false`, every loop reports [`Status::Init`], and
/// consumers are never called. It is zero-sized, so it stands in wherever a
/// traverser is required but no source exists.
pub struct Empty<T>(PhantomData<fn() -> T>);

/// Returns the empty traverser for `T`.
#[must_use]
pub const fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        empty()
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

impl<T> Traverser for Empty<T> {
    type Item = T;

    fn try_next<E, F>(&mut self, _: F) -> Result<bool, E>
    where
        F: FnOnce(T) -> Result<(), E>,
    {
        Ok(false)
    }

    fn for_next<E, F>(&mut self, _: F) -> Result<(), E>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        Ok(())
    }

    fn while_next<E, F>(&mut self, _: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, T) -> Result<(), E>,
    {
        Ok(Status::Init)
    }

    fn reset(&mut self) -> bool {
        true
    }
}

impl<T> Indexed for Empty<T> {
    fn try_next_indexed<E, F>(&mut self, _: F) -> Result<bool, E>
    where
        F: FnOnce(usize, T) -> Result<(), E>,
    {
        Ok(false)
    }

    fn for_next_indexed<E, F>(&mut self, _: F) -> Result<(), E>
    where
        F: FnMut(usize, T) -> Result<(), E>,
    {
        Ok(())
    }

    fn while_next_indexed<E, F>(&mut self, _: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, T) -> Result<(), E>,
    {
        Ok(Status::Init)
    }
}

impl<T> Duplex for Empty<T> {
    fn try_prev<E, F>(&mut self, _: F) -> Result<bool, E>
    where
        F: FnOnce(T) -> Result<(), E>,
    {
        Ok(false)
    }

    fn for_prev<E, F>(&mut self, _: F) -> Result<(), E>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        Ok(())
    }

    fn while_prev<E, F>(&mut self, _: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, T) -> Result<(), E>,
    {
        Ok(Status::Init)
    }
}

impl<T> DuplexIndexed for Empty<T> {
    fn try_prev_indexed<E, F>(&mut self, _: F) -> Result<bool, E>
    where
        F: FnOnce(usize, T) -> Result<(), E>,
    {
        Ok(false)
    }

    fn for_prev_indexed<E, F>(&mut self, _: F) -> Result<(), E>
    where
        F: FnMut(usize, T) -> Result<(), E>,
    {
        Ok(())
    }

    fn while_prev_indexed<E, F>(&mut self, _: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, T) -> Result<(), E>,
    {
        Ok(Status::Init)
    }
}
