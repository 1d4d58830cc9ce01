use crate::{
    storage::{Storage, StorageMut},
    ArrayIndex, NDArray, NDArrayMut, Result, Shape, SliceInfo,
};

/// A `D`-dimensional window into the buffer of an `N`-dimensional array.
///
/// A view never owns elements. Every access translates the view's own index
/// into an index of the underlying array through its [`SliceInfo`], and
/// slicing a view yields another view against the same buffer.
#[derive(Clone)]
pub struct View<S, const N: usize, const D: usize> {
    storage: S,
    base: Shape<N>,
    info: SliceInfo<N, D>,
}

pub type ArrayView<'a, T, const N: usize, const D: usize> = View<&'a [T], N, D>;
pub type ArrayViewMut<'a, T, const N: usize, const D: usize> = View<&'a mut [T], N, D>;

impl<S, const N: usize, const D: usize> View<S, N, D>
where
    S: Storage,
{
    pub(crate) fn new(storage: S, base: Shape<N>, info: SliceInfo<N, D>) -> Self {
        debug_assert_eq!(storage.as_slice().len(), base.size());
        Self {
            storage,
            base,
            info,
        }
    }

    /// Shape of the array the view borrows from.
    #[inline]
    pub fn base_shape(&self) -> &Shape<N> {
        &self.base
    }

    #[inline]
    pub fn info(&self) -> &SliceInfo<N, D> {
        &self.info
    }

    /// Selects a sub-view with `args` given in the coordinates of this view.
    pub fn slice<const R: usize>(
        &self,
        args: impl AsRef<[ArrayIndex]>,
    ) -> Result<View<&[S::Elem], N, R>> {
        let info = self.info.compose(args.as_ref())?;
        Ok(View::new(self.storage.as_slice(), self.base, info))
    }

    fn base_offset(&self, index: &[usize; D]) -> usize {
        self.base.offset(&self.info.to_base(index))
    }
}

impl<S, const N: usize, const D: usize> View<S, N, D>
where
    S: StorageMut,
{
    pub fn slice_mut<const R: usize>(
        &mut self,
        args: impl AsRef<[ArrayIndex]>,
    ) -> Result<View<&mut [S::Elem], N, R>> {
        let info = self.info.compose(args.as_ref())?;
        Ok(View::new(self.storage.as_mut_slice(), self.base, info))
    }
}

impl<S, const N: usize, const D: usize> NDArray<D> for View<S, N, D>
where
    S: Storage,
{
    type Elem = S::Elem;

    #[inline]
    fn shape(&self) -> &Shape<D> {
        self.info.shape()
    }

    fn get(&self, index: [isize; D]) -> Result<&S::Elem> {
        let index = self.info.shape().normalize_index(index)?;
        Ok(&self.storage.as_slice()[self.base_offset(&index)])
    }

    fn get_flat(&self, offset: usize) -> Option<&S::Elem> {
        if offset >= self.len() {
            return None;
        }
        let index = self.info.shape().unravel(offset);
        self.storage.as_slice().get(self.base_offset(&index))
    }
}

impl<S, const N: usize, const D: usize> NDArrayMut<D> for View<S, N, D>
where
    S: StorageMut,
{
    fn get_mut(&mut self, index: [isize; D]) -> Result<&mut S::Elem> {
        let index = self.info.shape().normalize_index(index)?;
        let offset = self.base_offset(&index);
        Ok(&mut self.storage.as_mut_slice()[offset])
    }

    fn get_flat_mut(&mut self, offset: usize) -> Option<&mut S::Elem> {
        if offset >= self.len() {
            return None;
        }
        let index = self.info.shape().unravel(offset);
        let offset = self.base_offset(&index);
        self.storage.as_mut_slice().get_mut(offset)
    }
}
