use core::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{Error, Result};

/// Sizes of the axes of a `D`-dimensional array together with the row-major
/// strides derived from them.
///
/// Strides are never supplied by the caller; two shapes are equal when their
/// sizes are equal.
#[derive(Clone, Copy, Debug)]
pub struct Shape<const D: usize> {
    sizes: [usize; D],
    strides: [usize; D],
}

impl<const D: usize> Shape<D> {
    /// Creates a shape from a list of axis sizes whose length must be `D`.
    pub fn new(sizes: &[usize]) -> Result<Self> {
        let sizes: [usize; D] = sizes.try_into().map_err(|_| {
            Error::invalid_argument(format!(
                "cannot build a {}-dimensional shape from {} sizes",
                D,
                sizes.len()
            ))
        })?;
        Ok(Self::from(sizes))
    }

    /// Creates a shape by prepending `first` to a shape of one dimension less.
    pub fn from_sub_shape<const E: usize>(first: usize, rest: &Shape<E>) -> Result<Self> {
        if E + 1 != D {
            return Err(Error::invalid_argument(format!(
                "cannot prepend an axis to a {}-dimensional shape to build a {}-dimensional one",
                E, D
            )));
        }

        let mut sizes = [0; D];
        sizes[0] = first;
        sizes[1..].copy_from_slice(&rest.sizes);
        Ok(Self::from(sizes))
    }

    /// Size of axis `axis`; negative values count from the last axis.
    pub fn axis_size(&self, axis: isize) -> Result<usize> {
        let n_dims = D as isize;
        if axis < -n_dims || axis >= n_dims {
            return Err(Error::out_of_range(format!(
                "axis {} is out of bounds for shape of dimension {}",
                axis, D
            )));
        }
        Ok(self.sizes[((axis + n_dims) % n_dims) as usize])
    }

    #[inline]
    pub const fn ndims(&self) -> usize {
        D
    }

    /// Resolves negative indices and checks every component against its axis.
    pub fn normalize_index(&self, index: [isize; D]) -> Result<[usize; D]> {
        let mut out = [0; D];
        for (axis, ((dst, &idx), &size)) in out
            .iter_mut()
            .zip(index.iter())
            .zip(self.sizes.iter())
            .enumerate()
        {
            *dst = normalize_axis_index(idx, axis, size)?;
        }
        Ok(out)
    }

    /// Buffer offset of an in-bounds multi-index.
    #[inline]
    pub fn offset(&self, index: &[usize; D]) -> usize {
        index
            .iter()
            .zip(self.strides.iter())
            .fold(0, |acc, (&i, &stride)| acc + i * stride)
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }

    #[inline]
    pub fn sizes(&self) -> &[usize; D] {
        &self.sizes
    }

    #[inline]
    pub fn strides(&self) -> &[usize; D] {
        &self.strides
    }

    /// Multi-index of the element at row-major `offset`; the last axis varies
    /// fastest.
    pub fn unravel(&self, mut offset: usize) -> [usize; D] {
        let mut index = [0; D];
        for (dst, &size) in index.iter_mut().zip(self.sizes.iter()).rev() {
            if size > 0 {
                *dst = offset % size;
                offset /= size;
            }
        }
        index
    }
}

/// Wraps a negative position on an axis of `size` elements and checks that it
/// lies in `[-size, size)`.
pub(crate) fn normalize_axis_index(index: isize, axis: usize, size: usize) -> Result<usize> {
    let n = size as isize;
    if index < -n || index >= n {
        return Err(Error::out_of_range(format!(
            "index {} is out of bounds for axis {} with size {}",
            index, axis, size
        )));
    }
    Ok((if index < 0 { index + n } else { index }) as usize)
}

impl<const D: usize> Default for Shape<D> {
    fn default() -> Self {
        Self::from([0; D])
    }
}

impl<const D: usize> From<[usize; D]> for Shape<D> {
    fn from(sizes: [usize; D]) -> Self {
        let mut strides = [0; D];
        strides
            .iter_mut()
            .zip(sizes.iter())
            .rfold(1, |acc, (stride, &size)| {
                *stride = acc;
                acc * size
            });
        Self { sizes, strides }
    }
}

impl<const D: usize> PartialEq for Shape<D> {
    fn eq(&self, other: &Self) -> bool {
        self.sizes == other.sizes
    }
}

impl<const D: usize> Eq for Shape<D> {}

impl<const D: usize> Hash for Shape<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sizes.hash(state);
    }
}

impl<const D: usize> fmt::Display for Shape<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shape(")?;
        for (i, size) in self.sizes.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", size)?;
        }
        f.write_str(")")
    }
}
