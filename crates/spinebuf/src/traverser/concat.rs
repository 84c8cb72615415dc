use alloc::boxed::Box;

use crate::traverser::Traverser;

/// Chains any number of iterators into one.
///
/// Sources are drained in order. A source is dropped as soon as it reports
/// exhaustion, so anything it keeps alive is released without waiting for
/// the whole chain to finish.
///
/// ```rust
/// use spinebuf::Concat;
///
/// let mut chain = Concat::new([vec![1, 2].into_iter(), vec![].into_iter(), vec![3].into_iter()]);
/// assert_eq!(chain.retained(), 3);
/// assert_eq!(chain.by_ref().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(chain.retained(), 0);
/// ```
#[derive(Debug)]
pub struct Concat<I> {
    sources: Box<[Option<I>]>,
    current: usize,
}

impl<I: Iterator> Concat<I> {
    /// Chains `sources` in iteration order.
    pub fn new(sources: impl IntoIterator<Item = I>) -> Self {
        Self {
            sources: sources.into_iter().map(Some).collect(),
            current: 0,
        }
    }

    /// Number of sources not yet released.
    pub fn retained(&self) -> usize {
        self.sources.iter().filter(|source| source.is_some()).count()
    }
}

impl<I: Iterator> Iterator for Concat<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while let Some(slot) = self.sources.get_mut(self.current) {
            if let Some(value) = slot.as_mut().and_then(Iterator::next) {
                return Some(value);
            }
            *slot = None;
            self.current += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sources[self.current..]
            .iter()
            .flatten()
            .map(Iterator::size_hint)
            .fold((0, Some(0)), |(lo, hi), (source_lo, source_hi)| {
                (
                    lo.saturating_add(source_lo),
                    hi.zip(source_hi).and_then(|(a, b)| a.checked_add(b)),
                )
            })
    }
}

/// A chain is a one-shot source: it traverses forward and cannot be reset.
impl<I: Iterator> Traverser for Concat<I> {
    type Item = I::Item;

    fn try_next<E, F>(&mut self, consumer: F) -> Result<bool, E>
    where
        F: FnOnce(I::Item) -> Result<(), E>,
    {
        match self.next() {
            Some(value) => consumer(value).map(|()| true),
            None => Ok(false),
        }
    }

    fn for_next<E, F>(&mut self, mut consumer: F) -> Result<(), E>
    where
        F: FnMut(I::Item) -> Result<(), E>,
    {
        for value in self.by_ref() {
            consumer(value)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> bool {
        false
    }
}
