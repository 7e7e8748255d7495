use nalgebra::Scalar;
use num::bigint::BigInt;
use num::traits::NumAssign;
use num::{BigRational, Signed, ToPrimitive};
use std::fmt::Debug;
use std::ops::Neg;

/// A number field suitable for storing or computing local basis data.
///
/// Implemented for `f32`, `f64` and the arbitrary-precision rationals [`BigRational`].
pub trait Field: Scalar + NumAssign + Neg<Output = Self> + PartialOrd + Debug + Send + Sync {
    /// Whether arithmetic in this field is exact.
    const EXACT: bool;

    /// The highest polynomial order for which this field may be used as a computation field.
    ///
    /// `None` means that there is no limit, which is only the case for exact fields.
    const MAX_ORDER: Option<usize>;

    /// The machine epsilon of the field, or zero for exact fields.
    fn epsilon() -> f64;

    fn from_integer(n: usize) -> Self;

    /// Converts a floating-point value to the field.
    ///
    /// Returns `None` if the value cannot be represented, e.g. a NaN in an exact field.
    fn from_f64(x: f64) -> Option<Self>;

    fn to_f64(&self) -> f64;

    /// The exact rational value of this number, if it is finite.
    fn to_rational(&self) -> Option<BigRational>;

    /// The field element closest to the given rational.
    fn from_rational(r: &BigRational) -> Self;

    fn abs(&self) -> Self;

    /// Absolute value as a double precision number.
    fn magnitude(&self) -> f64 {
        self.to_f64().abs()
    }

    /// Tests whether the value is zero, up to the given tolerance.
    ///
    /// Exact fields ignore the tolerance and test for exact zero.
    fn is_zero_within(&self, tol: f64) -> bool {
        if Self::EXACT {
            self.is_zero()
        } else {
            self.magnitude() <= tol
        }
    }
}

/// Converts a value between two fields.
///
/// Conversions into exact fields go through the exact rational value of the input, so that
/// converting e.g. from `f64` to [`BigRational`] is lossless.
///
/// # Panics
///
/// Panics if a non-finite value is converted into an exact field.
pub fn field_cast<Target: Field, Source: Field>(x: &Source) -> Target {
    if Target::EXACT {
        let r = x
            .to_rational()
            .expect("Cannot convert non-finite value to an exact field");
        Target::from_rational(&r)
    } else {
        Target::from_f64(x.to_f64()).expect("Inexact fields represent every f64 value")
    }
}

macro_rules! impl_float_field {
    ($type:ty, $max_order:expr) => {
        impl Field for $type {
            const EXACT: bool = false;
            const MAX_ORDER: Option<usize> = Some($max_order);

            fn epsilon() -> f64 {
                <$type>::EPSILON as f64
            }

            fn from_integer(n: usize) -> Self {
                n as $type
            }

            fn from_f64(x: f64) -> Option<Self> {
                Some(x as $type)
            }

            fn to_f64(&self) -> f64 {
                *self as f64
            }

            fn to_rational(&self) -> Option<BigRational> {
                BigRational::from_float(*self)
            }

            fn from_rational(r: &BigRational) -> Self {
                ToPrimitive::to_f64(r).unwrap_or(f64::NAN) as $type
            }

            fn abs(&self) -> Self {
                <$type>::abs(*self)
            }
        }
    };
}

impl_float_field!(f32, 4);
impl_float_field!(f64, 8);

impl Field for BigRational {
    const EXACT: bool = true;
    const MAX_ORDER: Option<usize> = None;

    fn epsilon() -> f64 {
        0.0
    }

    fn from_integer(n: usize) -> Self {
        BigRational::from_integer(BigInt::from(n))
    }

    fn from_f64(x: f64) -> Option<Self> {
        BigRational::from_float(x)
    }

    fn to_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }

    fn to_rational(&self) -> Option<BigRational> {
        Some(self.clone())
    }

    fn from_rational(r: &BigRational) -> Self {
        r.clone()
    }

    fn abs(&self) -> Self {
        Signed::abs(self)
    }
}
