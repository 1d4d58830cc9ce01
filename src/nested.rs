#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{Error, Result, Shape};

/// A nested list literal: either a single element or a list of sub-lists that
/// all share one shape.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Nested<T> {
    Scalar(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Sizes of the literal, read along its first elements.
    fn leading_sizes(&self) -> Result<SmallVec<[usize; 4]>> {
        let mut sizes = SmallVec::new();
        let mut node = self;
        while let Self::List(items) = node {
            let first = items
                .first()
                .ok_or_else(|| Error::invalid_argument("nested literal lists cannot be empty"))?;
            sizes.push(items.len());
            node = first;
        }
        Ok(sizes)
    }

    fn check(&self, sizes: &[usize]) -> Result<()> {
        match (self, sizes.split_first()) {
            (Self::Scalar(_), None) => Ok(()),
            (Self::List(items), Some((&len, rest))) if items.len() == len => {
                items.iter().try_for_each(|item| item.check(rest))
            }
            _ => Err(Error::invalid_argument(format!(
                "nested literal is not rectangular: expected sub-lists of shape {:?}",
                sizes
            ))),
        }
    }

    fn flatten_into(self, out: &mut Vec<T>) {
        match self {
            Self::Scalar(x) => out.push(x),
            Self::List(items) => items.into_iter().for_each(|item| item.flatten_into(out)),
        }
    }

    /// Validates the literal as a `D`-dimensional array and returns its shape
    /// with the elements in row-major order.
    pub(crate) fn into_shape_vec<const D: usize>(self) -> Result<(Shape<D>, Vec<T>)> {
        let sizes = self.leading_sizes()?;
        if sizes.len() != D {
            return Err(Error::invalid_argument(format!(
                "nested literal has depth {}, but a {}-dimensional array was requested",
                sizes.len(),
                D
            )));
        }
        self.check(&sizes)?;

        let shape = Shape::new(&sizes)?;
        let mut data = Vec::with_capacity(shape.size());
        self.flatten_into(&mut data);
        Ok((shape, data))
    }

    /// Rebuilds a literal of shape `sizes` from elements in row-major order.
    pub(crate) fn from_sizes_iter<I>(sizes: &[usize], iter: &mut I) -> Option<Self>
    where
        I: Iterator<Item = T>,
    {
        match sizes.split_first() {
            None => iter.next().map(Self::Scalar),
            Some((&len, rest)) => (0..len)
                .map(|_| Self::from_sizes_iter(rest, iter))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl<T> From<T> for Nested<T> {
    fn from(v: T) -> Self {
        Self::Scalar(v)
    }
}

#[doc(hidden)]
pub mod __private {
    #[cfg(not(feature = "std"))]
    pub use alloc::vec;
    #[cfg(feature = "std")]
    pub use std::vec;
}

/// Builds a [`Nested`] literal from bracketed lists.
///
/// ```
/// use ndslab::{nested, Nested};
///
/// let n = nested![[1, 2], [3, 4]];
/// assert_eq!(
///     n,
///     Nested::List(vec![
///         Nested::List(vec![Nested::Scalar(1), Nested::Scalar(2)]),
///         Nested::List(vec![Nested::Scalar(3), Nested::Scalar(4)]),
///     ])
/// );
/// ```
#[macro_export]
macro_rules! nested {
    ($([$( $inner:tt )*]),+ $(,)?) => {
        $crate::Nested::List($crate::__private::vec![$( $crate::nested!($( $inner )*) ),+])
    };
    ($( $x:expr ),* $(,)?) => {
        $crate::Nested::List($crate::__private::vec![$( $crate::Nested::Scalar($x) ),*])
    };
}

/// Builds an [`Array`](crate::Array) from a nested list literal.
///
/// Evaluates to `Result<Array<T, D>>`: ragged or empty lists are rejected
/// with [`Error::InvalidArgument`](crate::Error::InvalidArgument).
///
/// ```
/// use ndslab::{array, Array, NDArray, Result};
///
/// let a: Array<i32, 2> = array![[1, 2, 3], [4, 5, 6]].unwrap();
/// assert_eq!(a.shape().sizes(), &[2, 3]);
///
/// let ragged: Result<Array<i32, 2>> = array![[1, 2], [3]];
/// assert!(ragged.is_err());
/// ```
#[macro_export]
macro_rules! array {
    ($( $t:tt )*) => {
        $crate::Array::from_nested($crate::nested![$( $t )*])
    };
}
