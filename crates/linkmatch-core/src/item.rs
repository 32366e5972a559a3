//! Tile kinds.

use std::fmt::{self, Display};

/// A tile kind stored in a grid cell.
///
/// Kinds are small integers starting at `0`. The value [`ItemIndex::EMPTY`]
/// is reserved for unoccupied cells and is never a legal kind.
///
/// # Examples
///
/// ```
/// use linkmatch_core::ItemIndex;
///
/// let item = ItemIndex::new(3);
/// assert_eq!(item.value(), 3);
/// assert!(!item.is_empty());
/// assert!(ItemIndex::EMPTY.is_empty());
/// assert_eq!(ItemIndex::try_new(u8::MAX), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemIndex(u8);

impl ItemIndex {
    /// The sentinel marking an unoccupied cell.
    pub const EMPTY: Self = Self(u8::MAX);

    /// Number of distinct kinds that can be represented.
    pub const MAX_KINDS: usize = u8::MAX as usize;

    /// Creates a tile kind.
    ///
    /// # Panics
    ///
    /// Panics if `value` is the reserved sentinel value.
    #[must_use]
    #[inline]
    pub const fn new(value: u8) -> Self {
        assert!(value != u8::MAX, "item index collides with the empty sentinel");
        Self(value)
    }

    /// Creates a tile kind, returning `None` for the sentinel value.
    #[must_use]
    #[inline]
    pub const fn try_new(value: u8) -> Option<Self> {
        if value == u8::MAX {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the raw value (the sentinel for [`EMPTY`](Self::EMPTY)).
    #[must_use]
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` for the empty sentinel.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == u8::MAX
    }
}

impl Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.pad(".")
        } else {
            Display::fmt(&self.0, f)
        }
    }
}
