#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

mod array;
pub use array::{Array, ArrayView, ArrayViewMut, Iter, View};

mod array_index;
pub use array_index::ArrayIndex;

mod error;
pub use error::{Error, Result};

mod nested;
#[doc(hidden)]
pub use nested::__private;
pub use nested::Nested;

mod routine;

mod shape;
pub use shape::Shape;

mod slice;
pub use slice::{Slice, SliceRange};

mod slice_info;
pub use slice_info::SliceInfo;

pub mod storage;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_traits::AsPrimitive;

/// Read access shared by owning arrays and views.
///
/// Elements are addressed either by a multi-index or by a row-major offset
/// into the array's own index space; for a view that offset is translated to
/// the buffer it borrows from.
pub trait NDArray<const D: usize> {
    type Elem;

    fn shape(&self) -> &Shape<D>;

    /// Element at `index`; negative components count from the end of their
    /// axis.
    fn get(&self, index: [isize; D]) -> Result<&Self::Elem>;

    /// Element at row-major `offset`, or `None` past the end.
    fn get_flat(&self, offset: usize) -> Option<&Self::Elem>;

    fn all(&self) -> bool
    where
        Self::Elem: Copy + Into<bool>,
    {
        self.iter().all(|&x| x.into())
    }

    fn any(&self) -> bool
    where
        Self::Elem: Copy + Into<bool>,
    {
        self.iter().any(|&x| x.into())
    }

    /// Converts every element with `as`.
    fn cast<U>(&self) -> Array<U, D>
    where
        Self::Elem: AsPrimitive<U>,
        U: 'static + Copy,
    {
        self.map(|&x| x.as_())
    }

    fn equal<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialEq<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l == r)
    }

    fn equal_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialEq<U>,
    {
        self.map(|x| x == value)
    }

    /// Copies the elements into a new one-dimensional array.
    fn flatten(&self) -> Array<Self::Elem, 1>
    where
        Self::Elem: Clone,
    {
        Array::from(self.to_vec())
    }

    fn greater<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialOrd<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l > r)
    }

    fn greater_equal<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialOrd<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l >= r)
    }

    fn greater_equal_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialOrd<U>,
    {
        self.map(|x| x >= value)
    }

    fn greater_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialOrd<U>,
    {
        self.map(|x| x > value)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at row-major `offset`; negative offsets count from the end.
    fn item(&self, offset: isize) -> Result<&Self::Elem> {
        let i = routine::normalize_flat_index(offset, self.len())?;
        self.get_flat(i)
            .ok_or_else(|| Error::out_of_range(format!("no element at offset {}", i)))
    }

    #[inline]
    fn iter(&self) -> Iter<'_, Self, D> {
        Iter::new(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.shape().size()
    }

    fn less<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialOrd<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l < r)
    }

    fn less_equal<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialOrd<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l <= r)
    }

    fn less_equal_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialOrd<U>,
    {
        self.map(|x| x <= value)
    }

    fn less_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialOrd<U>,
    {
        self.map(|x| x < value)
    }

    fn map<U, F>(&self, f: F) -> Array<U, D>
    where
        F: FnMut(&Self::Elem) -> U,
    {
        Array::from_parts(*self.shape(), self.iter().map(f).collect())
    }

    #[inline]
    fn ndims(&self) -> usize {
        D
    }

    fn not_equal<R>(&self, other: &R) -> Result<Array<bool, D>>
    where
        R: NDArray<D> + ?Sized,
        Self::Elem: PartialEq<R::Elem>,
    {
        routine::zip_map(self, other, |l, r| l != r)
    }

    fn not_equal_scalar<U>(&self, value: &U) -> Array<bool, D>
    where
        Self::Elem: PartialEq<U>,
    {
        self.map(|x| x != value)
    }

    /// Copies the elements, in row-major order, into an array of another
    /// shape with the same number of elements.
    fn reshape<const E: usize>(&self, sizes: [usize; E]) -> Result<Array<Self::Elem, E>>
    where
        Self::Elem: Clone,
    {
        let out = Array::from_shape_vec(sizes, self.to_vec())?;
        tracing::trace!(from = %self.shape(), to = %out.shape(), "reshaped");
        Ok(out)
    }

    fn to_nested(&self) -> Nested<Self::Elem>
    where
        Self::Elem: Clone,
    {
        Nested::from_sizes_iter(self.shape().sizes(), &mut self.iter().cloned())
            .unwrap_or_else(|| Nested::List(Vec::new()))
    }

    /// Copies the elements into a new owning array of the same shape.
    fn to_owned_array(&self) -> Array<Self::Elem, D>
    where
        Self::Elem: Clone,
    {
        Array::from_parts(*self.shape(), self.to_vec())
    }

    fn to_vec(&self) -> Vec<Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Write access shared by owning arrays and mutable views.
pub trait NDArrayMut<const D: usize>: NDArray<D> {
    fn get_mut(&mut self, index: [isize; D]) -> Result<&mut Self::Elem>;

    fn get_flat_mut(&mut self, offset: usize) -> Option<&mut Self::Elem>;

    /// Overwrites every element with the corresponding element of `other`.
    /// Nothing is written when the shapes differ.
    fn assign<R>(&mut self, other: &R) -> Result<()>
    where
        R: NDArray<D, Elem = Self::Elem> + ?Sized,
        Self::Elem: Clone,
    {
        self.zip_mut_with(other, |dst, src| *dst = src.clone())
    }

    fn fill(&mut self, value: Self::Elem)
    where
        Self::Elem: Clone,
    {
        self.map_inplace(|x| *x = value.clone());
    }

    fn item_mut(&mut self, offset: isize) -> Result<&mut Self::Elem> {
        let i = routine::normalize_flat_index(offset, self.len())?;
        self.get_flat_mut(i)
            .ok_or_else(|| Error::out_of_range(format!("no element at offset {}", i)))
    }

    /// Applies `f` to every element in row-major order.
    fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self::Elem),
    {
        for i in 0..self.len() {
            if let Some(x) = self.get_flat_mut(i) {
                f(x);
            }
        }
    }

    /// Calls `f` with each element and the corresponding element of `other`.
    fn zip_mut_with<R, F>(&mut self, other: &R, mut f: F) -> Result<()>
    where
        R: NDArray<D> + ?Sized,
        F: FnMut(&mut Self::Elem, &R::Elem),
    {
        routine::ensure_same_shape(self.shape(), other.shape())?;

        for (i, src) in other.iter().enumerate() {
            if let Some(dst) = self.get_flat_mut(i) {
                f(dst, src);
            }
        }
        Ok(())
    }
}
