#[cfg(not(feature = "std"))]
use alloc::string::ToString;
use core::{
    fmt,
    num::NonZeroIsize,
    ops::{Bound, Mul, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
    str::FromStr,
};

use crate::{Error, Result};

/// A `start:stop:step` selection along one axis, as written by the caller.
///
/// Bounds may be negative (counted from the end of the axis) or open
/// (`Bound::Unbounded`). A `Slice` is resolved against a concrete axis size
/// with [`Slice::normalize`], which yields a [`SliceRange`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slice {
    pub(crate) start: Bound<isize>,
    pub(crate) end: Bound<isize>,
    pub(crate) step: isize,
}

impl Default for Slice {
    fn default() -> Self {
        Self {
            start: Bound::Included(0),
            end: Bound::Unbounded,
            step: 1,
        }
    }
}

impl From<Range<isize>> for Slice {
    fn from(v: Range<isize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(v: RangeFrom<isize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Unbounded,
            step: 1,
        }
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<RangeInclusive<isize>> for Slice {
    fn from(v: RangeInclusive<isize>) -> Self {
        Self {
            start: Bound::Included(*v.start()),
            end: Bound::Included(*v.end()),
            step: 1,
        }
    }
}

impl From<RangeToInclusive<isize>> for Slice {
    fn from(v: RangeToInclusive<isize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(v.end),
            step: 1,
        }
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(v: RangeTo<isize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

impl Slice {
    /// Creates `start:stop:step`; `None` leaves a bound open.
    pub fn new(
        start: impl Into<Option<isize>>,
        stop: impl Into<Option<isize>>,
        step: isize,
    ) -> Result<Self> {
        if step == 0 {
            return Err(Error::invalid_argument("slice step cannot be zero"));
        }
        Ok(Self {
            start: start.into().map_or(Bound::Unbounded, Bound::Included),
            end: stop.into().map_or(Bound::Unbounded, Bound::Excluded),
            step,
        })
    }

    /// The whole axis in its natural order.
    pub const fn full() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
            step: 1,
        }
    }

    #[inline]
    pub const fn step(&self) -> isize {
        self.step
    }

    pub const fn step_by(self, step: NonZeroIsize) -> Self {
        Self {
            step: step.get(),
            ..self
        }
    }

    /// Resolves negative and open bounds against an axis of `dim` elements and
    /// clamps the result into the axis.
    pub fn normalize(&self, dim: usize) -> SliceRange {
        let dim = dim as isize;
        let wrap = |x: isize| if x < 0 { x + dim } else { x };
        let start = match self.start {
            Bound::Included(x) => wrap(x),
            Bound::Excluded(x) => wrap(x).saturating_add(self.step.signum()),
            Bound::Unbounded if self.step > 0 => 0,
            Bound::Unbounded => dim - 1,
        };
        let stop = match self.end {
            Bound::Excluded(x) => wrap(x),
            Bound::Included(x) => wrap(x).saturating_add(self.step.signum()),
            Bound::Unbounded if self.step > 0 => dim,
            Bound::Unbounded => -1,
        };
        SliceRange::clamped(start, stop, self.step, dim)
    }
}

impl FromStr for Slice {
    type Err = Error;

    /// Parses `[start]:[stop][:[step]]`. Empty bounds are open and an empty
    /// or missing step is `1`.
    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.split(':');
        let start = fields.next().unwrap_or_default();
        let stop = fields.next().ok_or_else(|| {
            Error::invalid_argument(format!("slice `{}` must contain at least one `:`", s))
        })?;
        let step = fields.next().unwrap_or_default();
        if fields.next().is_some() {
            return Err(Error::invalid_argument(format!(
                "slice `{}` has more than three fields",
                s
            )));
        }

        let parse = |field: &str| -> Result<Option<isize>> {
            let field = field.trim();
            if field.is_empty() {
                return Ok(None);
            }
            field
                .parse::<isize>()
                .map(Some)
                .map_err(|e| Error::invalid_argument(format!("invalid index `{}`: {}", field, e)))
        };
        Self::new(parse(start)?, parse(stop)?, parse(step)?.unwrap_or(1))
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Bound<isize>| match b {
            Bound::Included(x) | Bound::Excluded(x) => x.to_string(),
            Bound::Unbounded => "none".to_string(),
        };
        match self.end {
            Bound::Included(_) => write!(
                f,
                "Slice({}, ={}, {})",
                bound(self.start),
                bound(self.end),
                self.step
            ),
            _ => write!(
                f,
                "Slice({}, {}, {})",
                bound(self.start),
                bound(self.end),
                self.step
            ),
        }
    }
}

/// A slice resolved against a concrete axis: `start` and `stop` are absolute
/// coordinates and `stop` lies exactly `len() * step` past `start`.
///
/// Composing two ranges with `*` (or [`SliceRange::compose`]) expresses a
/// slice of a slice directly in the coordinates of the outer axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SliceRange {
    start: isize,
    stop: isize,
    step: isize,
}

impl Default for SliceRange {
    fn default() -> Self {
        Self {
            start: 0,
            stop: 0,
            step: 1,
        }
    }
}

impl SliceRange {
    /// Creates a range from absolute coordinates without clamping.
    ///
    /// `len` is exact for any coordinates, but [`index`](Self::index) and
    /// [`compose`](Self::compose) expect a range whose selected coordinates
    /// fit in `isize`, which holds for every range [`Slice::normalize`]
    /// returns.
    pub fn new(start: isize, stop: isize, step: isize) -> Result<Self> {
        if step == 0 {
            return Err(Error::invalid_argument("slice step cannot be zero"));
        }
        Ok(Self { start, stop, step })
    }

    pub(crate) fn clamped(start: isize, stop: isize, step: isize, dim: isize) -> Self {
        debug_assert_ne!(step, 0);

        let (start, stop) = if step > 0 {
            let start = start.clamp(0, dim);
            (start, stop.clamp(start, dim))
        } else {
            let start = start.clamp(-1, dim - 1);
            (start, stop.clamp(-1, start))
        };
        let mut range = Self { start, stop, step };
        range.stop = start + range.len() as isize * step;
        range
    }

    /// Re-clamps an already resolved range into an axis of `dim` elements.
    /// Normalizing a normalized range is a no-op.
    pub fn normalize(&self, dim: usize) -> Self {
        Self::clamped(self.start, self.stop, self.step, dim as isize)
    }

    /// The range selecting `inner` out of the elements selected by `self`.
    pub fn compose(&self, inner: &SliceRange) -> Self {
        let start = self.step * inner.start + self.start;
        let step = self.step * inner.step;
        Self {
            start,
            stop: start + step * inner.len() as isize,
            step,
        }
    }

    /// Coordinate of the `i`-th selected element.
    #[inline]
    pub const fn index(&self, i: isize) -> isize {
        self.start + i * self.step
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of selected elements.
    pub const fn len(&self) -> usize {
        let ascending = self.step > 0 && self.stop > self.start;
        let descending = self.step < 0 && self.stop < self.start;
        if ascending || descending {
            (self.stop.abs_diff(self.start) - 1) / self.step.unsigned_abs() + 1
        } else {
            0
        }
    }

    #[inline]
    pub const fn start(&self) -> isize {
        self.start
    }

    #[inline]
    pub const fn step(&self) -> isize {
        self.step
    }

    #[inline]
    pub const fn stop(&self) -> isize {
        self.stop
    }
}

impl Mul for SliceRange {
    type Output = SliceRange;

    fn mul(self, rhs: SliceRange) -> SliceRange {
        self.compose(&rhs)
    }
}

impl Mul<isize> for SliceRange {
    type Output = isize;

    fn mul(self, rhs: isize) -> isize {
        self.index(rhs)
    }
}

/// Turns a normalized range back into a slice that normalizes to the same
/// range. An empty descending range parked at `-1` has no such slice, since a
/// negative start counts from the end of the axis.
impl TryFrom<SliceRange> for Slice {
    type Error = Error;

    fn try_from(v: SliceRange) -> Result<Self> {
        if v.start < 0 {
            return Err(Error::invalid_argument(format!(
                "{} starts before the axis and cannot be expressed as a slice",
                v
            )));
        }
        Ok(Self {
            start: Bound::Included(v.start),
            end: if v.stop < 0 {
                Bound::Unbounded
            } else {
                Bound::Excluded(v.stop)
            },
            step: v.step,
        })
    }
}

impl fmt::Display for SliceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SliceRange({}, {}, {})", self.start, self.stop, self.step)
    }
}

#[cfg(test)]
mod tests {
    use core::{num::NonZeroIsize, ops::Bound};

    use proptest::prelude::*;

    use super::{Slice, SliceRange};
    use crate::{Error, Result};

    fn range(start: isize, stop: isize, step: isize) -> SliceRange {
        SliceRange { start, stop, step }
    }

    #[test]
    fn new() -> Result<()> {
        let s1 = Slice::default();
        let s2 = Slice::new(None, 5, 1)?;
        let s3 = Slice::new(2, 8, 1)?;
        let s4 = Slice::new(13, 3, -2)?;

        assert_eq!(s1.start, Bound::Included(0));
        assert_eq!(s1.end, Bound::Unbounded);
        assert_eq!(s1.step, 1);

        assert_eq!(s2.start, Bound::Unbounded);
        assert_eq!(s2.end, Bound::Excluded(5));

        assert_eq!(s3.start, Bound::Included(2));
        assert_eq!(s3.end, Bound::Excluded(8));

        assert_eq!(s4.start, Bound::Included(13));
        assert_eq!(s4.end, Bound::Excluded(3));
        assert_eq!(s4.step, -2);

        Ok(())
    }

    #[test]
    fn new_with_zero_step() {
        assert!(matches!(Slice::new(0, 3, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            SliceRange::new(0, 3, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn convert_from_ranges() -> Result<()> {
        assert_eq!(Slice::from(-2..2).normalize(10), range(8, 8, 1));
        assert_eq!(Slice::from(2..).normalize(10), range(2, 10, 1));
        assert_eq!(Slice::from(..).normalize(10), range(0, 10, 1));
        assert_eq!(Slice::from(2..=4).normalize(10), range(2, 5, 1));
        assert_eq!(Slice::from(..=-1).normalize(10), range(0, 10, 1));
        assert_eq!(
            Slice::from(..=0)
                .step_by(NonZeroIsize::new(-1).unwrap())
                .normalize(10),
            range(9, -1, -1)
        );
        assert_eq!(
            Slice::from(..).step_by((-2).try_into()?).normalize(10),
            range(9, -1, -2)
        );

        Ok(())
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!(":".parse::<Slice>()?, Slice::full());
        assert_eq!("1:3".parse::<Slice>()?, Slice::new(1, 3, 1)?);
        assert_eq!(":-2".parse::<Slice>()?, Slice::new(None, -2, 1)?);
        assert_eq!("::-1".parse::<Slice>()?, Slice::new(None, None, -1)?);
        assert_eq!(" 2 : 8 : 3 ".parse::<Slice>()?, Slice::new(2, 8, 3)?);
        assert_eq!("4:".parse::<Slice>()?, Slice::new(4, None, 1)?);

        Ok(())
    }

    #[test]
    fn parse_malformed() {
        for text in ["", "3", "1:2:3:4", "a:3", "1:3:0", "1.5:2"] {
            assert!(
                matches!(text.parse::<Slice>(), Err(Error::InvalidArgument(_))),
                "text: {:?}",
                text
            );
        }
    }

    #[test]
    fn normalize() -> Result<()> {
        assert_eq!(Slice::new(3, 15, 2)?.normalize(10), range(3, 11, 2));
        assert_eq!(Slice::new(-4, None, -3)?.normalize(13), range(9, -3, -3));
        assert_eq!(Slice::new(None, -2, 1)?.normalize(9), range(0, 7, 1));
        assert_eq!(Slice::new(None, None, -4)?.normalize(12), range(11, -1, -4));
        assert_eq!(Slice::new(-1, 9, 1)?.normalize(5), range(4, 5, 1));
        assert_eq!(Slice::new(-3, 7, 2)?.normalize(20), range(17, 17, 2));
        assert_eq!(Slice::new(5, 6, -1)?.normalize(10), range(5, 5, -1));
        assert_eq!(Slice::new(13, 3, -2)?.normalize(20), range(13, 3, -2));

        Ok(())
    }

    #[test]
    fn normalize_out_of_bounds() -> Result<()> {
        assert_eq!(Slice::new(-20, None, 1)?.normalize(10), range(0, 10, 1));
        assert_eq!(Slice::new(20, None, 1)?.normalize(10), range(10, 10, 1));
        assert_eq!(Slice::new(-20, None, -1)?.normalize(10), range(-1, -1, -1));
        assert_eq!(Slice::new(20, None, -1)?.normalize(10), range(9, -1, -1));
        assert_eq!(Slice::full().normalize(0), range(0, 0, 1));

        Ok(())
    }

    #[test]
    fn normalize_inclusive_bounds_at_the_limits() -> Result<()> {
        assert_eq!(Slice::from(0..=isize::MAX).normalize(5), range(0, 5, 1));
        assert_eq!(
            Slice::from(..=isize::MIN)
                .step_by(NonZeroIsize::new(-1).unwrap())
                .normalize(5),
            range(4, -1, -1)
        );
        assert_eq!(
            Slice::new(isize::MAX, None, -1)?.normalize(5),
            range(4, -1, -1)
        );

        Ok(())
    }

    #[test]
    fn convert_back_from_normalized_ranges() -> Result<()> {
        let r = Slice::new(2, 9, 3)?.normalize(10);
        assert_eq!(Slice::try_from(r)?.normalize(10), r);

        let r = Slice::new(None, None, -3)?.normalize(10);
        assert_eq!(r, range(9, -3, -3));
        assert_eq!(Slice::try_from(r)?.normalize(10), r);

        let r = Slice::new(-10, None, -1)?.normalize(1);
        assert_eq!(r, range(-1, -1, -1));
        assert!(r.is_empty());
        assert!(matches!(Slice::try_from(r), Err(Error::InvalidArgument(_))));

        Ok(())
    }

    #[test]
    fn len_of_extreme_ranges() -> Result<()> {
        assert_eq!(SliceRange::new(isize::MIN, isize::MAX, 1)?.len(), usize::MAX);
        assert_eq!(SliceRange::new(isize::MAX, isize::MIN, -2)?.len(), usize::MAX / 2 + 1);
        assert_eq!(SliceRange::new(isize::MIN, isize::MAX, isize::MAX)?.len(), 3);
        assert!(SliceRange::new(isize::MAX, isize::MIN, isize::MAX)?.is_empty());

        Ok(())
    }

    #[test]
    fn len() {
        assert_eq!(range(0, 10, 1).len(), 10);
        assert_eq!(range(1, 10, 3).len(), 3);
        assert_eq!(range(9, -1, -3).len(), 4);
        assert_eq!(range(7, -1, -1).len(), 8);
        assert_eq!(range(3, 3, 1).len(), 0);
        assert_eq!(range(5, 3, 1).len(), 0);
        assert_eq!(range(3, 5, -1).len(), 0);
        assert!(range(3, 5, -1).is_empty());
    }

    #[test]
    fn index() {
        assert_eq!(range(2, 18, 2) * 3, 8);
        assert_eq!(range(2, 18, 2) * 7, 16);
        assert_eq!(range(57, 7, -5) * 6, 27);
        assert_eq!(range(57, 7, -5).index(1), 52);
    }

    #[test]
    fn compose() {
        assert_eq!(range(2, 18, 2) * range(1, 10, 3), range(4, 22, 6));
        assert_eq!(range(2, 18, 2) * range(7, -1, -1), range(16, 0, -2));
        assert_eq!(range(57, 7, -5) * range(1, 11, 2), range(52, 2, -10));
        assert_eq!(range(57, 7, -5).compose(&range(6, -3, -3)), range(27, 72, 15));
    }

    #[test]
    fn display() -> Result<()> {
        assert_eq!(Slice::new(0, 3, 1)?.to_string(), "Slice(0, 3, 1)");
        assert_eq!(Slice::full().to_string(), "Slice(none, none, 1)");
        assert_eq!(Slice::from(1..=3).to_string(), "Slice(1, =3, 1)");
        assert_eq!(range(9, -1, -2).to_string(), "SliceRange(9, -1, -2)");

        Ok(())
    }

    fn slice_strategy() -> impl Strategy<Value = Slice> {
        (
            prop::option::of(-30_isize..30),
            prop::option::of(-30_isize..30),
            (1_isize..6).prop_flat_map(|s| prop_oneof![Just(s), Just(-s)]),
        )
            .prop_map(|(start, stop, step)| Slice::new(start, stop, step).unwrap())
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(slice in slice_strategy(), dim in 0_usize..25) {
            let r = slice.normalize(dim);

            prop_assert_eq!(r.normalize(dim), r);
            match Slice::try_from(r) {
                Ok(s) => {
                    prop_assert_eq!(s.normalize(dim), r);
                }
                Err(_) => {
                    prop_assert!(r.start() < 0 && r.is_empty());
                }
            }
        }

        #[test]
        fn normalized_indices_lie_in_the_axis(slice in slice_strategy(), dim in 0_usize..25) {
            let r = slice.normalize(dim);

            prop_assert!(r.len() <= dim);
            for i in 0..r.len() as isize {
                let x = r.index(i);
                prop_assert!(0 <= x && x < dim as isize);
            }
        }

        #[test]
        fn compose_follows_the_index_law(
            outer in slice_strategy(),
            inner in slice_strategy(),
            dim in 0_usize..25,
        ) {
            let outer = outer.normalize(dim);
            let inner = inner.normalize(outer.len());
            let composed = outer * inner;

            prop_assert_eq!(composed.len(), inner.len());
            for i in 0..inner.len() as isize {
                prop_assert_eq!(composed.index(i), outer.index(inner.index(i)));
            }
        }

        #[test]
        fn negative_bounds_match_shifted_bounds(
            start in -20_isize..0,
            stop in -20_isize..0,
            dim in 1_usize..20,
        ) {
            let n = dim as isize;
            prop_assume!(start >= -n && stop >= -n);

            prop_assert_eq!(
                Slice::new(start, stop, 1).unwrap().normalize(dim),
                Slice::new(start + n, stop + n, 1).unwrap().normalize(dim)
            );
        }
    }
}
