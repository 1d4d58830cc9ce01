use smallvec::SmallVec;

use crate::{shape::normalize_axis_index, ArrayIndex, Error, Result, Shape, Slice, SliceRange};

/// An argument list split into fixed positions and per-axis slices.
///
/// Axes the caller did not mention are filled with full slices, so
/// `is_slice_axis` always has one entry per axis of the indexed array.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Selection {
    pub(crate) is_slice_axis: SmallVec<[bool; 4]>,
    pub(crate) indices: SmallVec<[isize; 4]>,
    pub(crate) slices: SmallVec<[Slice; 4]>,
}

impl Selection {
    pub(crate) fn classify(args: &[ArrayIndex], n_dims: usize) -> Result<Self> {
        if args.len() > n_dims {
            return Err(Error::invalid_argument(format!(
                "too many indices for array: array is {}-dimensional, but {} were indexed",
                n_dims,
                args.len()
            )));
        }

        let mut selection = Self::default();
        for arg in args {
            match arg {
                ArrayIndex::Index(i) => {
                    selection.is_slice_axis.push(false);
                    selection.indices.push(*i);
                }
                ArrayIndex::Slice(s) => {
                    selection.is_slice_axis.push(true);
                    selection.slices.push(*s);
                }
                ArrayIndex::Str(s) => {
                    selection.is_slice_axis.push(true);
                    selection.slices.push(s.parse()?);
                }
            }
        }
        for _ in args.len()..n_dims {
            selection.is_slice_axis.push(true);
            selection.slices.push(Slice::full());
        }
        Ok(selection)
    }

    /// Every axis is addressed by an integer.
    pub(crate) fn is_scalar(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Describes a `D`-dimensional view into an `N`-dimensional array.
///
/// Each axis of the array is either fixed at one position or traversed by a
/// [`SliceRange`] that is already normalized against the size of that axis.
/// The sliced axes, in order, become the axes of the view.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SliceInfo<const N: usize, const D: usize> {
    is_slice_axis: [bool; N],
    fixed_indices: SmallVec<[usize; 4]>,
    slices: [SliceRange; D],
    shape: Shape<D>,
}

impl<const N: usize> SliceInfo<N, N> {
    /// Selects the whole of `shape`.
    pub fn full(shape: &Shape<N>) -> Self {
        Self {
            is_slice_axis: [true; N],
            fixed_indices: SmallVec::new(),
            slices: shape.sizes().map(|n| Slice::full().normalize(n)),
            shape: *shape,
        }
    }
}

impl<const N: usize, const D: usize> SliceInfo<N, D> {
    /// Resolves `args` against an array of shape `base`.
    ///
    /// The argument list must leave exactly `D` axes sliced. Fixed indices may
    /// be negative and are checked against their axis here.
    pub fn new(base: &Shape<N>, args: &[ArrayIndex]) -> Result<Self> {
        let selection = Selection::classify(args, N)?;
        if selection.is_scalar() {
            return Err(Error::invalid_argument(format!(
                "{} indices address a single element of a {}-dimensional array, not a view",
                args.len(),
                N
            )));
        }
        if selection.slices.len() != D {
            return Err(Error::invalid_argument(format!(
                "arguments select {} axes of a {}-dimensional array, but a {}-dimensional view was requested",
                selection.slices.len(),
                N,
                D
            )));
        }

        let mut is_slice_axis = [false; N];
        let mut fixed_indices = SmallVec::new();
        let mut slices = [SliceRange::default(); D];
        let (mut k, mut j) = (0, 0);
        for (axis, ((dst, &is_slice), &size)) in is_slice_axis
            .iter_mut()
            .zip(selection.is_slice_axis.iter())
            .zip(base.sizes().iter())
            .enumerate()
        {
            *dst = is_slice;
            if is_slice {
                slices[j] = selection.slices[j].normalize(size);
                j += 1;
            } else {
                fixed_indices.push(normalize_axis_index(selection.indices[k], axis, size)?);
                k += 1;
            }
        }

        let shape = Shape::from(slices.map(|s| s.len()));
        tracing::trace!(%base, %shape, "built view");
        Ok(Self {
            is_slice_axis,
            fixed_indices,
            slices,
            shape,
        })
    }

    /// Applies `args` to the view described by `self` and expresses the
    /// result directly against the underlying array.
    pub fn compose<const R: usize>(&self, args: &[ArrayIndex]) -> Result<SliceInfo<N, R>> {
        let local = SliceInfo::<D, R>::new(&self.shape, args)?;
        Ok(self.merge(&local))
    }

    /// Folds `local`, a selection in the coordinates of this view, into a
    /// selection in the coordinates of the underlying array.
    pub fn merge<const R: usize>(&self, local: &SliceInfo<D, R>) -> SliceInfo<N, R> {
        let mut is_slice_axis = [false; N];
        let mut fixed_indices = SmallVec::new();
        let mut slices = [SliceRange::default(); R];
        let (mut k, mut j, mut lk, mut lj) = (0, 0, 0, 0);
        for (dst, &was_slice) in is_slice_axis.iter_mut().zip(self.is_slice_axis.iter()) {
            if !was_slice {
                fixed_indices.push(self.fixed_indices[k]);
                k += 1;
                continue;
            }

            let outer = self.slices[j];
            if local.is_slice_axis[j] {
                slices[lj] = outer.compose(&local.slices[lj]);
                *dst = true;
                lj += 1;
            } else {
                fixed_indices.push(outer.index(local.fixed_indices[lk] as isize) as usize);
                lk += 1;
            }
            j += 1;
        }

        tracing::trace!(outer = %self.shape, inner = %local.shape, "composed views");
        SliceInfo {
            is_slice_axis,
            fixed_indices,
            slices,
            shape: local.shape,
        }
    }

    /// Fixed positions of the non-sliced axes, in axis order.
    pub fn fixed_indices(&self) -> &[usize] {
        &self.fixed_indices
    }

    pub fn is_slice_axis(&self) -> &[bool; N] {
        &self.is_slice_axis
    }

    #[inline]
    pub fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    pub fn slices(&self) -> &[SliceRange; D] {
        &self.slices
    }

    /// Translates an in-bounds view index into an index of the underlying
    /// array.
    pub fn to_base(&self, index: &[usize; D]) -> [usize; N] {
        let mut out = [0; N];
        let (mut k, mut j) = (0, 0);
        for (dst, &is_slice) in out.iter_mut().zip(self.is_slice_axis.iter()) {
            if is_slice {
                *dst = self.slices[j].index(index[j] as isize) as usize;
                j += 1;
            } else {
                *dst = self.fixed_indices[k];
                k += 1;
            }
        }
        out
    }
}

/// Builds an argument list for [`slice`](crate::Array::slice).
///
/// Each argument is anything convertible into [`ArrayIndex`]: an integer, a
/// range, a [`Slice`] or a `"start:stop:step"` string. A range may be
/// followed by `;step`.
///
/// ```
/// use ndslab::{array, s, Array};
///
/// let a: Array<i32, 2> = array![[1, 2, 3], [4, 5, 6]].unwrap();
/// let v = a.slice::<2>(s![.., 1..3]).unwrap();
/// assert_eq!(v.to_string(), "{{2, 3}, {5, 6}}");
///
/// let r = a.slice::<1>(s![1, ..;-1]).unwrap();
/// assert_eq!(r.to_string(), "{6, 5, 4}");
/// ```
#[macro_export]
macro_rules! s {
    (@fold [$( $idx:tt )*]) => {
        [$( $idx )*]
    };
    (@fold [$( $idx:tt )*] $r:expr;$s:expr $(, $( $t:tt )*)?) => {
        $crate::s!(@fold
            [$( $idx )* $crate::ArrayIndex::from($crate::Slice::from($r).step_by(
                ::core::num::NonZeroIsize::new($s).expect("slice step cannot be zero")
            )),]
            $($( $t )*)?
        )
    };
    (@fold [$( $idx:tt )*] $r:expr $(, $( $t:tt )*)?) => {
        $crate::s!(@fold
            [$( $idx )* $crate::ArrayIndex::from($r),]
            $($( $t )*)?
        )
    };
    ($( $t:tt )*) => {
        $crate::s!(@fold [] $( $t )*)
    };
}
