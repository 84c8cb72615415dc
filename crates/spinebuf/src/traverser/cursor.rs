use crate::{
    error::BufferError,
    traverser::{Control, Duplex, DuplexIndexed, Indexed, Status, Traverser},
};

/// A bounded sequence that can be read at any position.
pub trait Addressable {
    /// Value produced by [`get`](Self::get).
    type Item;

    /// Number of addressable positions.
    fn len(&self) -> usize;

    /// The value at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<Self::Item>;

    /// Whether there are no positions at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T> Addressable for &'a [T] {
    type Item = &'a T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&'a T> {
        <[T]>::get(self, index)
    }
}

/// A sequence holding exactly one value, handed out by clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Single<T>(pub T);

impl<T: Clone> Addressable for Single<T> {
    type Item = T;

    fn len(&self) -> usize {
        1
    }

    fn get(&self, index: usize) -> Option<T> {
        (index == 0).then(|| self.0.clone())
    }
}

/// A traverser over a single value.
///
/// ```rust
/// use core::convert::Infallible;
/// use spinebuf::{Traverser, once};
///
/// let mut seen = None;
/// let mut cursor = once('x');
/// assert_eq!(cursor.try_next(|c| Ok::<_, Infallible>(seen = Some(c))), Ok(true));
/// assert_eq!(cursor.try_next(|_| Ok::<_, Infallible>(())), Ok(false));
/// assert_eq!(seen, Some('x'));
/// ```
pub fn once<T: Clone>(value: T) -> Cursor<Single<T>> {
    Cursor::new(Single(value))
}

/// Cursor over the window `[lo, hi)` of an [`Addressable`] source.
///
/// The cursor `px` always satisfies `lo <= px <= hi`. Forward steps read
/// `px` then increment it; backward steps decrement it then read. `reset`
/// returns the cursor to the position it was created with.
#[derive(Debug, Clone)]
pub struct Cursor<S> {
    source: S,
    lo: usize,
    hi: usize,
    p0: usize,
    px: usize,
}

impl<S: Addressable> Cursor<S> {
    /// Cursor over the whole source, positioned at its start.
    pub fn new(source: S) -> Self {
        let hi = source.len();
        Self {
            source,
            lo: 0,
            hi,
            p0: 0,
            px: 0,
        }
    }

    /// Cursor over the whole source, positioned past its last value, ready
    /// for backward traversal.
    pub fn at_end(source: S) -> Self {
        let hi = source.len();
        Self {
            source,
            lo: 0,
            hi,
            p0: hi,
            px: hi,
        }
    }

    /// Cursor over `[lo, hi)` starting (and resetting) at `p0`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] unless
    /// `lo <= p0 <= hi <= source.len()`.
    pub fn window(source: S, lo: usize, hi: usize, p0: usize) -> Result<Self, BufferError> {
        let count = source.len();
        if hi > count {
            return Err(BufferError::IndexOutOfBounds { index: hi, count });
        }
        if lo > hi {
            return Err(BufferError::IndexOutOfBounds {
                index: lo,
                count: hi,
            });
        }
        if !(lo..=hi).contains(&p0) {
            return Err(BufferError::IndexOutOfBounds {
                index: p0,
                count: hi,
            });
        }
        Ok(Self {
            source,
            lo,
            hi,
            p0,
            px: p0,
        })
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.px
    }

    /// Number of values left in the forward direction.
    pub fn remaining(&self) -> usize {
        self.hi - self.px
    }

    /// The `[lo, hi)` window this cursor walks.
    pub fn bounds(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }

    /// The source being walked.
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    fn advance(&mut self) -> Option<(usize, S::Item)> {
        if self.px >= self.hi {
            return None;
        }
        let index = self.px;
        let value = self.source.get(index)?;
        self.px += 1;
        Some((index, value))
    }

    #[inline]
    fn retreat(&mut self) -> Option<(usize, S::Item)> {
        if self.px <= self.lo {
            return None;
        }
        let index = self.px - 1;
        let value = self.source.get(index)?;
        self.px = index;
        Some((index, value))
    }

    fn drive<E, F>(
        &mut self,
        step: fn(&mut Self) -> Option<(usize, S::Item)>,
        mut consumer: F,
    ) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, S::Item) -> Result<(), E>,
    {
        let mut control = Control::default();
        let mut status = Status::Init;
        while let Some((index, value)) = step(self) {
            status = Status::Completed;
            consumer(&mut control, index, value)?;
            if control.is_exited() {
                return Ok(Status::Exited);
            }
        }
        Ok(status)
    }
}

impl<S: Addressable> Traverser for Cursor<S> {
    type Item = S::Item;

    fn try_next<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(S::Item) -> Result<(), E>,
    {
        match self.advance() {
            Some((_, value)) => consumer(value).map(|()| true),
            None => Ok(false),
        }
    }

    fn for_next<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(S::Item) -> Result<(), E>,
    {
        while let Some((_, value)) = self.advance() {
            consumer(value)?;
        }
        Ok(())
    }

    fn while_next<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, S::Item) -> Result<(), E>,
    {
        self.drive(Self::advance, |control, _, value| consumer(control, value))
    }

    fn reset(&mut self) -> bool {
        self.px = self.p0;
        true
    }
}

impl<S: Addressable> Indexed for Cursor<S> {
    fn try_next_indexed<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(usize, S::Item) -> Result<(), E>,
    {
        match self.advance() {
            Some((index, value)) => consumer(index, value).map(|()| true),
            None => Ok(false),
        }
    }

    fn for_next_indexed<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(usize, S::Item) -> Result<(), E>,
    {
        while let Some((index, value)) = self.advance() {
            consumer(index, value)?;
        }
        Ok(())
    }

    fn while_next_indexed<E, F>(&mut self, consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, S::Item) -> Result<(), E>,
    {
        self.drive(Self::advance, consumer)
    }
}

impl<S: Addressable> Duplex for Cursor<S> {
    fn try_prev<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(S::Item) -> Result<(), E>,
    {
        match self.retreat() {
            Some((_, value)) => consumer(value).map(|()| true),
            None => Ok(false),
        }
    }

    fn for_prev<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(S::Item) -> Result<(), E>,
    {
        while let Some((_, value)) = self.retreat() {
            consumer(value)?;
        }
        Ok(())
    }

    fn while_prev<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, S::Item) -> Result<(), E>,
    {
        self.drive(Self::retreat, |control, _, value| consumer(control, value))
    }
}

impl<S: Addressable> DuplexIndexed for Cursor<S> {
    fn try_prev_indexed<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(usize, S::Item) -> Result<(), E>,
    {
        match self.retreat() {
            Some((index, value)) => consumer(index, value).map(|()| true),
            None => Ok(false),
        }
    }

    fn for_prev_indexed<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(usize, S::Item) -> Result<(), E>,
    {
        while let Some((index, value)) = self.retreat() {
            consumer(index, value)?;
        }
        Ok(())
    }

    fn while_prev_indexed<E, F>(&mut self, consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, usize, S::Item) -> Result<(), E>,
    {
        self.drive(Self::retreat, consumer)
    }
}
