use core::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of a registered unit. Ids are handed out by an [`IdAllocator`] and start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub u64);

impl UnitId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Sequential id source owned by a single simulation.
///
/// Ids are strictly increasing and never reused, even after the unit they named is removed.
/// Two allocators never share an id space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .unwrap_or_else(|| panic!("unit id space exhausted after {}", id.0));
        id
    }

    /// The id the next call to [`IdAllocator::allocate`] will return.
    pub fn peek(&self) -> UnitId {
        UnitId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one_and_increments() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.peek(), UnitId(1));
        assert_eq!(ids.allocate(), UnitId(1));
        assert_eq!(ids.allocate(), UnitId(2));
        assert_eq!(ids.peek(), UnitId(3));
    }

    #[test]
    fn allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), UnitId(1));
    }
}
