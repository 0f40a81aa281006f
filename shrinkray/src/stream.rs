//! Lazy, pull-based streams of shrink candidates.

/// A lazy sequence of shrink candidates
///
/// No work is done for elements that are never pulled. Streams are single
/// pass; calling `shrink` again with the same value and context starts an
/// identical new stream.
pub struct Stream<T> {
    inner: Box<dyn Iterator<Item = T>>,
}

impl<T: 'static> Stream<T> {
    /// Wrap any iterator
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = T> + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// The empty stream
    pub fn nil() -> Self {
        Self::new(std::iter::empty())
    }

    /// A stream of exactly one element
    pub fn once(item: T) -> Self {
        Self::new(std::iter::once(item))
    }

    /// A stream over already computed elements
    pub fn of(items: Vec<T>) -> Self {
        Self::new(items.into_iter())
    }

    /// Defer building a stream until its first element is requested
    pub fn lazy<F>(build: F) -> Self
    where
        F: FnOnce() -> Stream<T> + 'static,
    {
        let mut build = Some(build);
        let mut current: Option<Stream<T>> = None;
        Self::new(std::iter::from_fn(move || {
            if current.is_none() {
                current = build.take().map(|f| f());
            }
            current.as_mut()?.next()
        }))
    }

    /// Concatenate streams, pulling each one only once the previous is drained
    pub fn concat(streams: Vec<Stream<T>>) -> Self {
        Self::new(streams.into_iter().flatten())
    }

    /// Apply `f` to every element
    pub fn map<U, F>(self, f: F) -> Stream<U>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        Stream::new(self.inner.map(f))
    }

    /// Keep only the elements satisfying `predicate`
    pub fn filter<F>(self, predicate: F) -> Stream<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        Stream::new(self.inner.filter(predicate))
    }

    /// Append `other` after this stream
    pub fn join(self, other: Stream<T>) -> Stream<T> {
        Stream::new(self.inner.chain(other))
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }
}
