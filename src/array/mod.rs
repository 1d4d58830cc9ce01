mod fmt;

mod iter;
pub use iter::Iter;

mod ops;

mod view;
pub use view::{ArrayView, ArrayViewMut, View};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::mem;

use num_traits::{AsPrimitive, One, Zero};

use crate::{
    ArrayIndex, Error, NDArray, NDArrayMut, Nested, Result, Shape, SliceInfo, SliceRange,
};

/// An owning, contiguous, row-major `D`-dimensional array.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Array<T, const D: usize> {
    shape: Shape<D>,
    data: Vec<T>,
}

impl<T, const D: usize> Default for Array<T, D> {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            data: Vec::new(),
        }
    }
}

impl<T, const D: usize> From<Shape<D>> for Array<T, D>
where
    T: Clone + Default,
{
    fn from(shape: Shape<D>) -> Self {
        Self::from_shape(shape)
    }
}

impl<T> From<Vec<T>> for Array<T, 1> {
    fn from(data: Vec<T>) -> Self {
        Self {
            shape: Shape::from([data.len()]),
            data,
        }
    }
}

impl<T> FromIterator<T> for Array<T, 1> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, const D: usize> TryFrom<Nested<T>> for Array<T, D> {
    type Error = Error;

    fn try_from(nested: Nested<T>) -> Result<Self> {
        let (shape, data) = nested.into_shape_vec()?;
        Ok(Self { shape, data })
    }
}

impl<T, const D: usize> NDArray<D> for Array<T, D> {
    type Elem = T;

    #[inline]
    fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    fn get(&self, index: [isize; D]) -> Result<&T> {
        let index = self.shape.normalize_index(index)?;
        Ok(&self.data[self.shape.offset(&index)])
    }

    #[inline]
    fn get_flat(&self, offset: usize) -> Option<&T> {
        self.data.get(offset)
    }
}

impl<T, const D: usize> NDArrayMut<D> for Array<T, D> {
    fn get_mut(&mut self, index: [isize; D]) -> Result<&mut T> {
        let index = self.shape.normalize_index(index)?;
        let offset = self.shape.offset(&index);
        Ok(&mut self.data[offset])
    }

    #[inline]
    fn get_flat_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.data.get_mut(offset)
    }

    fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    fn map_inplace<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.data.iter_mut().for_each(f);
    }
}

impl<T> Array<T, 1> {
    /// Values `start, start + step, ...` up to but excluding `stop`.
    pub fn arange(start: isize, stop: isize, step: isize) -> Result<Self>
    where
        T: 'static + Copy,
        isize: AsPrimitive<T>,
    {
        let range = SliceRange::new(start, stop, step)?;
        Ok((0..range.len() as isize)
            .map(|i| range.index(i).as_())
            .collect())
    }
}

impl<T, const D: usize> Array<T, D> {
    pub(crate) fn from_parts(shape: Shape<D>, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.size(), data.len());
        Self { shape, data }
    }

    /// Creates an array of default-initialized elements.
    pub fn new(sizes: [usize; D]) -> Self
    where
        T: Clone + Default,
    {
        Self::from_shape(Shape::from(sizes))
    }

    /// Creates an array of default-initialized elements laid out by `shape`.
    pub fn from_shape(shape: Shape<D>) -> Self
    where
        T: Clone + Default,
    {
        Self {
            data: vec![T::default(); shape.size()],
            shape,
        }
    }

    pub fn from_elem(sizes: [usize; D], elem: T) -> Self
    where
        T: Clone,
    {
        let shape = Shape::from(sizes);
        Self {
            data: vec![elem; shape.size()],
            shape,
        }
    }

    pub fn from_nested(nested: Nested<T>) -> Result<Self> {
        Self::try_from(nested)
    }

    /// Creates an array by calling `f` with every multi-index in row-major
    /// order.
    pub fn from_shape_fn<F>(sizes: [usize; D], mut f: F) -> Self
    where
        F: FnMut([usize; D]) -> T,
    {
        let shape = Shape::from(sizes);
        let data = (0..shape.size()).map(|i| f(shape.unravel(i))).collect();
        Self { shape, data }
    }

    /// Wraps `data`, laid out in row-major order, as an array of shape
    /// `sizes`.
    pub fn from_shape_vec(sizes: [usize; D], data: Vec<T>) -> Result<Self> {
        let shape = Shape::from(sizes);
        if shape.size() != data.len() {
            return Err(Error::invalid_argument(format!(
                "cannot build an array of {} from {} elements",
                shape,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn ones(sizes: [usize; D]) -> Self
    where
        T: Clone + One,
    {
        Self::from_elem(sizes, T::one())
    }

    pub fn zeros(sizes: [usize; D]) -> Self
    where
        T: Clone + Zero,
    {
        Self::from_elem(sizes, T::zero())
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Moves the elements into an array of another shape with the same
    /// number of elements.
    pub fn into_shape<const E: usize>(self, sizes: [usize; E]) -> Result<Array<T, E>> {
        let from = self.shape;
        let out = Array::from_shape_vec(sizes, self.data)?;
        tracing::trace!(%from, to = %out.shape, "reshaped in place");
        Ok(out)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Size in bytes of one element.
    #[inline]
    pub const fn item_size(&self) -> usize {
        mem::size_of::<T>()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Size in bytes of all elements.
    pub fn nbytes(&self) -> usize {
        self.data.len() * self.item_size()
    }

    /// A one-dimensional view over all elements, without copying.
    pub fn ravel(&self) -> ArrayView<'_, T, 1, 1> {
        let shape = Shape::from([self.data.len()]);
        View::new(self.data.as_slice(), shape, SliceInfo::full(&shape))
    }

    /// A `R`-dimensional view selected by `args`.
    ///
    /// Returns [`Error::InvalidArgument`] if the arguments do not leave exactly
    /// `R` axes sliced, and [`Error::OutOfRange`] for an integer outside its
    /// axis.
    pub fn slice<const R: usize>(
        &self,
        args: impl AsRef<[ArrayIndex]>,
    ) -> Result<ArrayView<'_, T, D, R>> {
        let info = SliceInfo::new(&self.shape, args.as_ref())?;
        Ok(View::new(self.data.as_slice(), self.shape, info))
    }

    pub fn slice_mut<const R: usize>(
        &mut self,
        args: impl AsRef<[ArrayIndex]>,
    ) -> Result<ArrayViewMut<'_, T, D, R>> {
        let info = SliceInfo::new(&self.shape, args.as_ref())?;
        Ok(View::new(self.data.as_mut_slice(), self.shape, info))
    }

    pub fn view(&self) -> ArrayView<'_, T, D, D> {
        View::new(self.data.as_slice(), self.shape, SliceInfo::full(&self.shape))
    }

    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T, D, D> {
        let info = SliceInfo::full(&self.shape);
        View::new(self.data.as_mut_slice(), self.shape, info)
    }
}
