#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
use core::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::Slice;

/// One positional argument of an indexing call.
///
/// `Str` carries a slice in the `start:stop:step` mini-language; it is parsed
/// when the argument list is classified.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ArrayIndex {
    Index(isize),
    Slice(Slice),
    Str(String),
}

impl ArrayIndex {
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Whether the argument selects a range of an axis rather than a single
    /// position. Strings count as slices.
    pub const fn is_slice(&self) -> bool {
        matches!(self, Self::Slice(_) | Self::Str(_))
    }
}

impl From<isize> for ArrayIndex {
    fn from(v: isize) -> Self {
        Self::Index(v)
    }
}

impl From<i32> for ArrayIndex {
    fn from(v: i32) -> Self {
        Self::Index(v as isize)
    }
}

impl From<usize> for ArrayIndex {
    fn from(v: usize) -> Self {
        Self::Index(v as isize)
    }
}

impl From<Range<isize>> for ArrayIndex {
    fn from(v: Range<isize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeFrom<isize>> for ArrayIndex {
    fn from(v: RangeFrom<isize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeFull> for ArrayIndex {
    fn from(v: RangeFull) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeInclusive<isize>> for ArrayIndex {
    fn from(v: RangeInclusive<isize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeToInclusive<isize>> for ArrayIndex {
    fn from(v: RangeToInclusive<isize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<RangeTo<isize>> for ArrayIndex {
    fn from(v: RangeTo<isize>) -> Self {
        Self::from(Slice::from(v))
    }
}

impl From<Slice> for ArrayIndex {
    fn from(v: Slice) -> Self {
        Self::Slice(v)
    }
}

impl From<&str> for ArrayIndex {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ArrayIndex {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}
