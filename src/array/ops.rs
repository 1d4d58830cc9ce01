use core::{
    num::Wrapping,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
        DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
        SubAssign,
    },
};

use num_complex::Complex;

use super::{Array, View};
use crate::{
    routine,
    storage::{Storage, StorageMut},
    NDArray, NDArrayMut, Result,
};

macro_rules! impl_unary_op {
    ($trait:ident, $op:ident) => {
        impl<T, const D: usize> $trait for Array<T, D>
        where
            T: $trait<Output = T> + Clone,
        {
            type Output = Array<T, D>;

            fn $op(mut self) -> Self::Output {
                for elem in self.iter_mut() {
                    *elem = elem.clone().$op();
                }
                self
            }
        }

        impl<T, const D: usize> $trait for &Array<T, D>
        where
            T: $trait + Clone,
        {
            type Output = Array<<T as $trait>::Output, D>;

            fn $op(self) -> Self::Output {
                self.map(|x| x.clone().$op())
            }
        }

        impl<S, const N: usize, const D: usize> $trait for &View<S, N, D>
        where
            S: Storage,
            S::Elem: $trait + Clone,
        {
            type Output = Array<<S::Elem as $trait>::Output, D>;

            fn $op(self) -> Self::Output {
                self.map(|x| x.clone().$op())
            }
        }
    };
}

impl_unary_op!(Neg, neg);
impl_unary_op!(Not, not);

macro_rules! impl_binary_op {
    ($trait:ident, $op:ident) => {
        impl<'r, T, R, const D: usize> $trait<&'r R> for &Array<T, D>
        where
            R: NDArray<D>,
            R::Elem: Clone,
            T: $trait<R::Elem> + Clone,
        {
            type Output = Result<Array<<T as $trait<R::Elem>>::Output, D>>;

            fn $op(self, rhs: &'r R) -> Self::Output {
                routine::zip_map(self, rhs, |l, r| l.clone().$op(r.clone()))
            }
        }

        impl<'r, S, R, const N: usize, const D: usize> $trait<&'r R> for &View<S, N, D>
        where
            R: NDArray<D>,
            R::Elem: Clone,
            S: Storage,
            S::Elem: $trait<R::Elem> + Clone,
        {
            type Output = Result<Array<<S::Elem as $trait<R::Elem>>::Output, D>>;

            fn $op(self, rhs: &'r R) -> Self::Output {
                routine::zip_map(self, rhs, |l, r| l.clone().$op(r.clone()))
            }
        }

        impl<T, T1, const D: usize> $trait<Wrapping<T1>> for &Array<T, D>
        where
            T: $trait<Wrapping<T1>> + Clone,
            T1: Copy,
        {
            type Output = Array<<T as $trait<Wrapping<T1>>>::Output, D>;

            fn $op(self, rhs: Wrapping<T1>) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }

        impl<T, T1, const D: usize> $trait<Complex<T1>> for &Array<T, D>
        where
            T: $trait<Complex<T1>> + Clone,
            T1: Copy,
        {
            type Output = Array<<T as $trait<Complex<T1>>>::Output, D>;

            fn $op(self, rhs: Complex<T1>) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }

        impl<S, T1, const N: usize, const D: usize> $trait<Wrapping<T1>> for &View<S, N, D>
        where
            S: Storage,
            S::Elem: $trait<Wrapping<T1>> + Clone,
            T1: Copy,
        {
            type Output = Array<<S::Elem as $trait<Wrapping<T1>>>::Output, D>;

            fn $op(self, rhs: Wrapping<T1>) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }

        impl<S, T1, const N: usize, const D: usize> $trait<Complex<T1>> for &View<S, N, D>
        where
            S: Storage,
            S::Elem: $trait<Complex<T1>> + Clone,
            T1: Copy,
        {
            type Output = Array<<S::Elem as $trait<Complex<T1>>>::Output, D>;

            fn $op(self, rhs: Complex<T1>) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(BitAnd, bitand);
impl_binary_op!(BitOr, bitor);
impl_binary_op!(BitXor, bitxor);
impl_binary_op!(Div, div);
impl_binary_op!(Mul, mul);
impl_binary_op!(Rem, rem);
impl_binary_op!(Shl, shl);
impl_binary_op!(Shr, shr);
impl_binary_op!(Sub, sub);

macro_rules! impl_binary_op_with_scalar {
    ($trait:ident, $op:ident, $scalar_type:ty) => {
        impl<T, const D: usize> $trait<$scalar_type> for &Array<T, D>
        where
            T: $trait<$scalar_type> + Clone,
        {
            type Output = Array<<T as $trait<$scalar_type>>::Output, D>;

            fn $op(self, rhs: $scalar_type) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }

        impl<S, const N: usize, const D: usize> $trait<$scalar_type> for &View<S, N, D>
        where
            S: Storage,
            S::Elem: $trait<$scalar_type> + Clone,
        {
            type Output = Array<<S::Elem as $trait<$scalar_type>>::Output, D>;

            fn $op(self, rhs: $scalar_type) -> Self::Output {
                self.map(|x| x.clone().$op(rhs))
            }
        }
    };
}

macro_rules! impl_all_binary_op_with_scalar {
    ($scalar_type:ty) => {
        impl_binary_op_with_scalar!(Add, add, $scalar_type);
        impl_binary_op_with_scalar!(BitAnd, bitand, $scalar_type);
        impl_binary_op_with_scalar!(BitOr, bitor, $scalar_type);
        impl_binary_op_with_scalar!(BitXor, bitxor, $scalar_type);
        impl_binary_op_with_scalar!(Div, div, $scalar_type);
        impl_binary_op_with_scalar!(Mul, mul, $scalar_type);
        impl_binary_op_with_scalar!(Rem, rem, $scalar_type);
        impl_binary_op_with_scalar!(Shl, shl, $scalar_type);
        impl_binary_op_with_scalar!(Shr, shr, $scalar_type);
        impl_binary_op_with_scalar!(Sub, sub, $scalar_type);
    };
}

impl_all_binary_op_with_scalar!(bool);
impl_all_binary_op_with_scalar!(usize);
impl_all_binary_op_with_scalar!(u8);
impl_all_binary_op_with_scalar!(u16);
impl_all_binary_op_with_scalar!(u32);
impl_all_binary_op_with_scalar!(u64);
impl_all_binary_op_with_scalar!(u128);
impl_all_binary_op_with_scalar!(isize);
impl_all_binary_op_with_scalar!(i8);
impl_all_binary_op_with_scalar!(i16);
impl_all_binary_op_with_scalar!(i32);
impl_all_binary_op_with_scalar!(i64);
impl_all_binary_op_with_scalar!(i128);
impl_all_binary_op_with_scalar!(f32);
impl_all_binary_op_with_scalar!(f64);

macro_rules! impl_binary_op_for_scalar {
    ($trait:ident, $op:ident, $scalar_type:ty) => {
        impl<T, const D: usize> $trait<&Array<T, D>> for $scalar_type
        where
            $scalar_type: $trait<T>,
            T: Clone,
        {
            type Output = Array<<$scalar_type as $trait<T>>::Output, D>;

            fn $op(self, rhs: &Array<T, D>) -> Self::Output {
                rhs.map(|x| self.$op(x.clone()))
            }
        }

        impl<S, const N: usize, const D: usize> $trait<&View<S, N, D>> for $scalar_type
        where
            S: Storage,
            S::Elem: Clone,
            $scalar_type: $trait<S::Elem>,
        {
            type Output = Array<<$scalar_type as $trait<S::Elem>>::Output, D>;

            fn $op(self, rhs: &View<S, N, D>) -> Self::Output {
                rhs.map(|x| self.$op(x.clone()))
            }
        }
    };
}

macro_rules! impl_all_binary_op_for_scalar {
    ($scalar_type:ty) => {
        impl_binary_op_for_scalar!(Add, add, $scalar_type);
        impl_binary_op_for_scalar!(BitAnd, bitand, $scalar_type);
        impl_binary_op_for_scalar!(BitOr, bitor, $scalar_type);
        impl_binary_op_for_scalar!(BitXor, bitxor, $scalar_type);
        impl_binary_op_for_scalar!(Div, div, $scalar_type);
        impl_binary_op_for_scalar!(Mul, mul, $scalar_type);
        impl_binary_op_for_scalar!(Rem, rem, $scalar_type);
        impl_binary_op_for_scalar!(Shl, shl, $scalar_type);
        impl_binary_op_for_scalar!(Shr, shr, $scalar_type);
        impl_binary_op_for_scalar!(Sub, sub, $scalar_type);
    };
}

impl_all_binary_op_for_scalar!(bool);
impl_all_binary_op_for_scalar!(usize);
impl_all_binary_op_for_scalar!(u8);
impl_all_binary_op_for_scalar!(u16);
impl_all_binary_op_for_scalar!(u32);
impl_all_binary_op_for_scalar!(u64);
impl_all_binary_op_for_scalar!(u128);
impl_all_binary_op_for_scalar!(isize);
impl_all_binary_op_for_scalar!(i8);
impl_all_binary_op_for_scalar!(i16);
impl_all_binary_op_for_scalar!(i32);
impl_all_binary_op_for_scalar!(i64);
impl_all_binary_op_for_scalar!(i128);
impl_all_binary_op_for_scalar!(f32);
impl_all_binary_op_for_scalar!(f64);

macro_rules! impl_binary_assign_op {
    ($trait:ident, $op:ident) => {
        impl<T, T1, const D: usize> $trait<Wrapping<T1>> for Array<T, D>
        where
            T: $trait<Wrapping<T1>>,
            T1: Copy,
        {
            fn $op(&mut self, rhs: Wrapping<T1>) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }

        impl<T, T1, const D: usize> $trait<Complex<T1>> for Array<T, D>
        where
            T: $trait<Complex<T1>>,
            T1: Copy,
        {
            fn $op(&mut self, rhs: Complex<T1>) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }

        impl<S, T1, const N: usize, const D: usize> $trait<Wrapping<T1>> for View<S, N, D>
        where
            S: StorageMut,
            S::Elem: $trait<Wrapping<T1>>,
            T1: Copy,
        {
            fn $op(&mut self, rhs: Wrapping<T1>) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }

        impl<S, T1, const N: usize, const D: usize> $trait<Complex<T1>> for View<S, N, D>
        where
            S: StorageMut,
            S::Elem: $trait<Complex<T1>>,
            T1: Copy,
        {
            fn $op(&mut self, rhs: Complex<T1>) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }
    };
}

impl_binary_assign_op!(AddAssign, add_assign);
impl_binary_assign_op!(BitAndAssign, bitand_assign);
impl_binary_assign_op!(BitOrAssign, bitor_assign);
impl_binary_assign_op!(BitXorAssign, bitxor_assign);
impl_binary_assign_op!(DivAssign, div_assign);
impl_binary_assign_op!(MulAssign, mul_assign);
impl_binary_assign_op!(RemAssign, rem_assign);
impl_binary_assign_op!(ShlAssign, shl_assign);
impl_binary_assign_op!(ShrAssign, shr_assign);
impl_binary_assign_op!(SubAssign, sub_assign);

macro_rules! impl_binary_assign_op_with_scalar {
    ($trait:ident, $op:ident, $scalar_type:ty) => {
        impl<T, const D: usize> $trait<$scalar_type> for Array<T, D>
        where
            T: $trait<$scalar_type>,
        {
            fn $op(&mut self, rhs: $scalar_type) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }

        impl<S, const N: usize, const D: usize> $trait<$scalar_type> for View<S, N, D>
        where
            S: StorageMut,
            S::Elem: $trait<$scalar_type>,
        {
            fn $op(&mut self, rhs: $scalar_type) {
                self.map_inplace(|elem| elem.$op(rhs));
            }
        }
    };
}

macro_rules! impl_all_binary_assign_op_with_scalar {
    ($scalar_type:ty) => {
        impl_binary_assign_op_with_scalar!(AddAssign, add_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(BitAndAssign, bitand_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(BitOrAssign, bitor_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(BitXorAssign, bitxor_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(DivAssign, div_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(MulAssign, mul_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(RemAssign, rem_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(ShlAssign, shl_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(ShrAssign, shr_assign, $scalar_type);
        impl_binary_assign_op_with_scalar!(SubAssign, sub_assign, $scalar_type);
    };
}

impl_all_binary_assign_op_with_scalar!(bool);
impl_all_binary_assign_op_with_scalar!(usize);
impl_all_binary_assign_op_with_scalar!(u8);
impl_all_binary_assign_op_with_scalar!(u16);
impl_all_binary_assign_op_with_scalar!(u32);
impl_all_binary_assign_op_with_scalar!(u64);
impl_all_binary_assign_op_with_scalar!(u128);
impl_all_binary_assign_op_with_scalar!(isize);
impl_all_binary_assign_op_with_scalar!(i8);
impl_all_binary_assign_op_with_scalar!(i16);
impl_all_binary_assign_op_with_scalar!(i32);
impl_all_binary_assign_op_with_scalar!(i64);
impl_all_binary_assign_op_with_scalar!(i128);
impl_all_binary_assign_op_with_scalar!(f32);
impl_all_binary_assign_op_with_scalar!(f64);

#[cfg(test)]
mod tests {
    use core::num::Wrapping;

    use num_complex::Complex;

    use crate::{array, s, Array, Error, NDArray, NDArrayMut, Result};

    fn a3() -> Array<i64, 3> {
        Array::from_shape_fn([2, 3, 4], |[i, j, k]| (i * 12 + j * 4 + k) as i64)
    }

    #[test]
    fn unary_ops() -> Result<()> {
        {
            let subject = -a3();

            assert_eq!(subject.len(), 24);
            for (i, (&actual, expected)) in subject.iter().zip((0..).map(|x: i64| -x)).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let a = a3();
            let subject = -&a;

            assert_eq!(subject.to_vec(), a.map(|x| -x).to_vec());
        }
        {
            let a: Array<bool, 1> = array![true, false]?;

            assert_eq!((!&a).as_slice(), &[false, true]);
        }
        {
            let a = a3();
            let subject = -&a.slice::<1>(s![1, 2])?;

            assert_eq!(subject.as_slice(), &[-20, -21, -22, -23]);
        }

        Ok(())
    }

    #[test]
    fn binary_ops() -> Result<()> {
        let a = a3();
        let b = a3().map(|x| x + 10);
        {
            let subject = (&a + &b)?;

            assert_eq!(subject.len(), 24);
            for (i, (&actual, expected)) in subject.iter().zip((10_i64..).step_by(2)).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let subject = (&b - &a)?;

            assert!(subject.iter().all(|&x| x == 10));
        }
        {
            let subject = (&a * &a.view())?;

            assert_eq!(*subject.get([1, 2, 3])?, 23 * 23);
        }
        {
            let subject = (&a.slice::<2>(s![0])? % &a.slice::<2>(s![1])?.map(|x| x - 11))?;

            assert_eq!(subject.as_slice()[..4], [0, 1, 2, 3]);
        }
        {
            let subject = &a + 3_i64;

            for (i, (&actual, expected)) in subject.iter().zip(3_i64..).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let subject = 3_i64 - &a;

            for (i, (&actual, expected)) in subject.iter().zip((-20_i64..=3).rev()).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let subject = &a.slice::<1>(s![.., 0, 0])? << 1_u32;

            assert_eq!(subject.as_slice(), &[0, 24]);
        }

        Ok(())
    }

    #[test]
    fn binary_ops_with_mismatched_shapes() {
        let a = a3();
        let b = Array::<i64, 3>::zeros([2, 4, 3]);

        assert!(matches!(&a + &b, Err(Error::InvalidArgument(_))));
        assert!(matches!(&a.view() & &b, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn binary_ops_with_wrapping_and_complex() -> Result<()> {
        let a: Array<Wrapping<u8>, 1> = array![Wrapping(250_u8), Wrapping(1)]?;
        let subject = &a + Wrapping(10_u8);

        assert_eq!(subject.as_slice(), &[Wrapping(4), Wrapping(11)]);

        let c: Array<Complex<f64>, 1> = array![Complex::new(1.0, 2.0), Complex::new(0.0, -1.0)]?;
        let subject = &c * Complex::new(0.0, 1.0);

        assert_eq!(
            subject.as_slice(),
            &[Complex::new(-2.0, 1.0), Complex::new(1.0, 0.0)]
        );

        Ok(())
    }

    #[test]
    fn binary_ops_on_views_with_wrapping_and_complex() -> Result<()> {
        let a: Array<Wrapping<u8>, 1> = array![Wrapping(250_u8), Wrapping(1), Wrapping(7)]?;
        let subject = &a.slice::<1>(s![..;2])? + Wrapping(10_u8);

        assert_eq!(subject.as_slice(), &[Wrapping(4), Wrapping(17)]);

        let c: Array<Complex<f64>, 2> = array![
            [Complex::new(1.0, 2.0), Complex::new(3.0, 0.0)],
            [Complex::new(0.0, -1.0), Complex::new(2.0, 2.0)]
        ]?;
        let subject = &c.slice::<1>(s![.., 0])? * Complex::new(0.0, 1.0);

        assert_eq!(
            subject.as_slice(),
            &[Complex::new(-2.0, 1.0), Complex::new(1.0, 0.0)]
        );

        Ok(())
    }

    #[test]
    fn scalar_on_the_left_of_a_view() -> Result<()> {
        let a = a3();
        let v = a.slice::<1>(s![1, 2, ..;-1])?;

        assert_eq!((100_i64 - &v).as_slice(), &[77, 78, 79, 80]);
        assert_eq!((2_i64 * &v).as_slice(), &[46, 44, 42, 40]);
        assert_eq!((1_i64 << &a.slice::<1>(s![0, 0])?).as_slice(), &[1, 2, 4, 8]);

        Ok(())
    }

    #[test]
    fn binary_assign_ops_on_views_with_wrapping_and_complex() -> Result<()> {
        {
            let mut subject: Array<Wrapping<u8>, 1> =
                array![Wrapping(255_u8), Wrapping(255), Wrapping(3)]?;
            let mut v = subject.slice_mut::<1>(s![1..])?;
            v += Wrapping(2_u8);

            assert_eq!(
                subject.as_slice(),
                &[Wrapping(255), Wrapping(1), Wrapping(5)]
            );
        }
        {
            let mut subject = Array::<Complex<f64>, 2>::from_elem([2, 2], Complex::new(1.0, 1.0));
            let mut row = subject.slice_mut::<1>(s![-1])?;
            row *= Complex::new(0.0, 2.0);

            assert_eq!(
                subject.as_slice(),
                &[
                    Complex::new(1.0, 1.0),
                    Complex::new(1.0, 1.0),
                    Complex::new(-2.0, 2.0),
                    Complex::new(-2.0, 2.0)
                ]
            );
        }

        Ok(())
    }

    #[test]
    fn binary_assign_ops() -> Result<()> {
        {
            let mut subject = a3();
            subject += 3_i64;

            for (i, (&actual, expected)) in subject.iter().zip(3_i64..).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let mut subject = a3();
            subject.zip_mut_with(&a3(), |l, r| *l += r)?;

            for (i, (&actual, expected)) in subject.iter().zip((0_i64..).step_by(2)).enumerate() {
                assert_eq!(actual, expected, "{}th element is not equal", i);
            }
        }
        {
            let mut subject = a3();
            let mut last = subject.slice_mut::<1>(s![-1, -1])?;
            last *= 0_i64;
            let mut v = subject.slice_mut::<2>(s![0, ..;2])?;
            v -= 100_i64;

            assert_eq!(
                subject.to_vec()[..12],
                [-100, -99, -98, -97, 4, 5, 6, 7, -92, -91, -90, -89]
            );
            assert_eq!(subject.to_vec()[20..], [0, 0, 0, 0]);
        }
        {
            let mut subject: Array<Complex<f64>, 1> = array![Complex::new(1.0, 1.0)]?;
            subject *= Complex::new(2.0, 0.0);

            assert_eq!(subject.as_slice(), &[Complex::new(2.0, 2.0)]);
        }

        Ok(())
    }
}
