use core::convert::Infallible;

use crate::traverser::{Control, Status, Traverser};

/// Pull-style iterator over a traverser.
///
/// Each step calls [`Traverser::try_next`] and parks the produced value until
/// it is taken by [`next`](Iterator::next). [`has_next`](Self::has_next) may
/// therefore advance the underlying cursor by one value ahead of what the
/// caller has observed.
pub struct Iter<T: Traverser> {
    traverser: T,
    cached: Option<T::Item>,
}

impl<T: Traverser> Iter<T> {
    pub(crate) fn new(traverser: T) -> Self {
        Self {
            traverser,
            cached: None,
        }
    }

    /// Whether another value is available, pulling it from the traverser if
    /// none is parked.
    pub fn has_next(&mut self) -> bool {
        if self.cached.is_none() {
            let cached = &mut self.cached;
            let Ok(_) = self.traverser.try_next(|value| {
                *cached = Some(value);
                Ok::<_, Infallible>(())
            });
        }
        self.cached.is_some()
    }

    /// Returns the traverser, dropping any parked value.
    pub fn into_inner(self) -> T {
        self.traverser
    }
}

impl<T: Traverser> Iterator for Iter<T> {
    type Item = T::Item;

    fn next(&mut self) -> Option<T::Item> {
        self.has_next();
        self.cached.take()
    }
}

/// Traverser that clones the values of a traverser over references.
///
/// Created by [`Traverser::cloned`].
#[derive(Debug, Clone)]
pub struct Cloned<T> {
    inner: T,
}

impl<T> Cloned<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<'a, T, U> Traverser for Cloned<T>
where
    T: Traverser<Item = &'a U>,
    U: Clone + 'a,
{
    type Item = U;

    fn try_next<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(U) -> Result<(), E>,
    {
        self.inner.try_next(|value| consumer(value.clone()))
    }

    fn for_next<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(U) -> Result<(), E>,
    {
        self.inner.for_next(|value| consumer(value.clone()))
    }

    fn while_next<E, F>(&mut self, mut consumer: F) -> Result<Status, E>
    where
        F: FnMut(&mut Control, U) -> Result<(), E>,
    {
        self.inner
            .while_next(|control, value| consumer(control, value.clone()))
    }

    fn reset(&mut self) -> bool {
        self.inner.reset()
    }
}
