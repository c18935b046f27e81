use std::{error::Error, fmt, slice::Iter};

/// Returned by `BoundedList::try_push` when the list is full. Carries the
/// rejected item back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityError<T> {
    pub item: T,
    pub capacity: usize,
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundedList is at its capacity of {} items", self.capacity)
    }
}

impl<T: fmt::Debug> Error for CapacityError<T> {}

/// An ordered sequence that never grows past `N` items.
///
/// Inserting into a full list is rejected rather than reallocating, and
/// removing from the front compacts the remaining items left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedList<T, const N: usize> {
    list: Vec<T>,
}

impl<T, const N: usize> BoundedList<T, N> {
    pub fn new() -> Self {
        Self {
            list: Vec::with_capacity(N),
        }
    }

    /// Build a list from items already known to fit, such as a decoded region.
    /// Anything past the capacity is rejected along with the first overflowing item.
    pub fn try_from_vec(items: Vec<T>) -> Result<Self, CapacityError<T>> {
        let mut list = Self::new();
        for item in items {
            list.try_push(item)?;
        }
        Ok(list)
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.list.len() >= N
    }

    pub fn try_push(&mut self, item: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError { item, capacity: N });
        }
        self.list.push(item);
        Ok(())
    }

    pub fn front(&self) -> Option<&T> {
        self.list.first()
    }

    /// Remove the oldest item, shifting the rest left
    pub fn pop_front(&mut self) -> Option<T> {
        if self.list.is_empty() {
            return None;
        }
        Some(self.list.remove(0))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

}

impl<T, const N: usize> Default for BoundedList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedList<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
