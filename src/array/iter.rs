use core::iter::FusedIterator;

use crate::NDArray;

/// Row-major iterator over the elements of an array or a view.
pub struct Iter<'a, A: ?Sized, const D: usize> {
    array: &'a A,
    front: usize,
    back: usize,
}

impl<'a, A, const D: usize> Iter<'a, A, D>
where
    A: NDArray<D> + ?Sized,
{
    pub(crate) fn new(array: &'a A) -> Self {
        Self {
            array,
            front: 0,
            back: array.len(),
        }
    }
}

impl<A: ?Sized, const D: usize> Clone for Iter<'_, A, D> {
    fn clone(&self) -> Self {
        Self {
            array: self.array,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, A, const D: usize> Iterator for Iter<'a, A, D>
where
    A: NDArray<D> + ?Sized,
{
    type Item = &'a A::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let elem = self.array.get_flat(self.front);
        self.front += 1;
        elem
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<A, const D: usize> DoubleEndedIterator for Iter<'_, A, D>
where
    A: NDArray<D> + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.array.get_flat(self.back)
    }
}

impl<A, const D: usize> ExactSizeIterator for Iter<'_, A, D> where A: NDArray<D> + ?Sized {}

impl<A, const D: usize> FusedIterator for Iter<'_, A, D> where A: NDArray<D> + ?Sized {}
