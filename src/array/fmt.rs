use core::fmt;

use super::{Array, View};
use crate::{storage::Storage, NDArray};

const NUM_EDGE_ELEMENTS: usize = 3;
const TRUNCATION_THRESHOLD: usize = 1_000;

struct FormatOption {
    num_edge_elements: usize,
}

impl Default for FormatOption {
    fn default() -> Self {
        Self {
            num_edge_elements: NUM_EDGE_ELEMENTS,
        }
    }
}

impl FormatOption {
    fn new(array_len: usize, alternate: bool) -> Self {
        Self::default().without_truncation(alternate || array_len < TRUNCATION_THRESHOLD)
    }

    fn without_truncation(mut self, valid: bool) -> Self {
        if valid {
            self.num_edge_elements = usize::MAX / 2;
        }
        self
    }
}

/// Writes the sub-array starting at row-major `offset` along `axis` and the
/// axes after it.
fn format_array<A, F, const D: usize>(
    array: &A,
    axis: usize,
    offset: usize,
    option: &FormatOption,
    f: &mut fmt::Formatter<'_>,
    fmt: &mut F,
) -> fmt::Result
where
    A: NDArray<D> + ?Sized,
    F: FnMut(&A::Elem, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    if axis == D {
        return match array.get_flat(offset) {
            Some(elem) => fmt(elem, f),
            None => Ok(()),
        };
    }

    let len = array.shape().sizes()[axis];
    let stride = array.shape().strides()[axis];
    let edge = option.num_edge_elements;

    f.write_str("{")?;
    if len > edge * 2 {
        for i in 0..edge {
            fmt_separator(i, f)?;
            format_array(array, axis + 1, offset + i * stride, option, f, fmt)?;
        }
        f.write_str(", ...")?;
        for i in len - edge..len {
            fmt_separator(1, f)?;
            format_array(array, axis + 1, offset + i * stride, option, f, fmt)?;
        }
    } else {
        for i in 0..len {
            fmt_separator(i, f)?;
            format_array(array, axis + 1, offset + i * stride, option, f, fmt)?;
        }
    }
    f.write_str("}")
}

fn fmt_separator(i: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if i != 0 {
        f.write_str(", ")?;
    }
    Ok(())
}

fn format_with<A, F, const D: usize>(
    array: &A,
    f: &mut fmt::Formatter<'_>,
    mut fmt: F,
) -> fmt::Result
where
    A: NDArray<D> + ?Sized,
    F: FnMut(&A::Elem, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let option = FormatOption::new(array.len(), f.alternate());
    format_array(array, 0, 0, &option, f, &mut fmt)
}

macro_rules! impl_fmt {
    ($trait:ident) => {
        impl<T, const D: usize> fmt::$trait for Array<T, D>
        where
            T: fmt::$trait,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                format_with(self, f, <T as fmt::$trait>::fmt)
            }
        }

        impl<S, const N: usize, const D: usize> fmt::$trait for View<S, N, D>
        where
            S: Storage,
            S::Elem: fmt::$trait,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                format_with(self, f, <S::Elem as fmt::$trait>::fmt)
            }
        }
    };
}

impl_fmt!(Binary);
impl_fmt!(Display);
impl_fmt!(LowerExp);
impl_fmt!(LowerHex);
impl_fmt!(Octal);
impl_fmt!(UpperExp);
impl_fmt!(UpperHex);

impl<T, const D: usize> fmt::Debug for Array<T, D>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_with(self, f, <T as fmt::Debug>::fmt)?;
        write!(f, ", shape={}", self.shape())
    }
}

impl<S, const N: usize, const D: usize> fmt::Debug for View<S, N, D>
where
    S: Storage,
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_with(self, f, <S::Elem as fmt::Debug>::fmt)?;
        write!(f, ", shape={}, base={}", self.shape(), self.base_shape())
    }
}
