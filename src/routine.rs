#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{Array, Error, NDArray, Result, Shape};

/// Fails unless `lhs` and `rhs` have identical sizes; arrays are never
/// broadcast.
pub(crate) fn ensure_same_shape<const D: usize>(lhs: &Shape<D>, rhs: &Shape<D>) -> Result<()> {
    if lhs != rhs {
        return Err(Error::invalid_argument(format!(
            "cannot operate on arrays with different shapes {} and {}",
            lhs, rhs
        )));
    }
    Ok(())
}

/// Wraps a negative row-major offset and checks it against `len` elements.
pub(crate) fn normalize_flat_index(offset: isize, len: usize) -> Result<usize> {
    let n = len as isize;
    if offset < -n || offset >= n {
        return Err(Error::out_of_range(format!(
            "index {} is out of bounds for size {}",
            offset, len
        )));
    }
    Ok((if offset < 0 { offset + n } else { offset }) as usize)
}

/// Combines two equally shaped arrays element by element in row-major order.
pub(crate) fn zip_map<L, R, U, F, const D: usize>(
    lhs: &L,
    rhs: &R,
    mut f: F,
) -> Result<Array<U, D>>
where
    L: NDArray<D> + ?Sized,
    R: NDArray<D> + ?Sized,
    F: FnMut(&L::Elem, &R::Elem) -> U,
{
    ensure_same_shape(lhs.shape(), rhs.shape())?;

    let data = lhs
        .iter()
        .zip(rhs.iter())
        .map(|(l, r)| f(l, r))
        .collect::<Vec<_>>();
    Ok(Array::from_parts(*lhs.shape(), data))
}

#[cfg(test)]
mod tests {
    use super::{ensure_same_shape, normalize_flat_index, zip_map};
    use crate::{Array, Error, Result, Shape};

    #[test]
    fn same_shape() -> Result<()> {
        ensure_same_shape(&Shape::from([2, 3]), &Shape::from([2, 3]))?;

        let err = ensure_same_shape(&Shape::from([2, 3]), &Shape::from([3, 2])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument(
                "cannot operate on arrays with different shapes Shape(2, 3) and Shape(3, 2)"
                    .into()
            )
        );

        Ok(())
    }

    #[test]
    fn flat_index() -> Result<()> {
        assert_eq!(normalize_flat_index(0, 6)?, 0);
        assert_eq!(normalize_flat_index(-1, 6)?, 5);
        assert_eq!(normalize_flat_index(-6, 6)?, 0);
        assert!(matches!(normalize_flat_index(6, 6), Err(Error::OutOfRange(_))));
        assert!(matches!(normalize_flat_index(-7, 6), Err(Error::OutOfRange(_))));
        assert!(matches!(normalize_flat_index(0, 0), Err(Error::OutOfRange(_))));

        Ok(())
    }

    #[test]
    fn zip_map_in_row_major_order() -> Result<()> {
        let a = Array::from_shape_vec([2, 2], vec![1, 2, 3, 4])?;
        let b = Array::from_shape_vec([2, 2], vec![10, 20, 30, 40])?;
        let subject = zip_map(&a, &b, |l, r| l * r)?;

        assert_eq!(subject.as_slice(), &[10, 40, 90, 160]);

        Ok(())
    }
}
