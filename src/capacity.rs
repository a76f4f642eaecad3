/*!
# Capacity Values

Arc capacities and flow amounts are plain numbers. The [`Capacity`] trait collects the
arithmetic needed for residual bookkeeping and defines which values are admissible:
finite and non-negative. Validity is only checked at the engine boundary, so the
algorithms themselves can assume well-formed inputs.
*/

use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, Sub, SubAssign},
};

use num::Zero;

/// Numeric values usable as arc capacities and flow amounts.
///
/// Implemented for the primitive unsigned, signed, and float types. Note that
/// floats are admissible but validity then also excludes `NaN` and infinities.
pub trait Capacity:
    Copy + Debug + Display + PartialOrd + Zero + Sub<Output = Self> + AddAssign + SubAssign
{
    /// Returns *true* if the value is admissible as an arc capacity, i.e. finite and non-negative
    fn is_valid_capacity(&self) -> bool;
}

macro_rules! impl_capacity_unsigned {
    ($($t:ty),*) => {$(
        impl Capacity for $t {
            fn is_valid_capacity(&self) -> bool {
                true
            }
        }
    )*};
}

macro_rules! impl_capacity_signed {
    ($($t:ty),*) => {$(
        impl Capacity for $t {
            fn is_valid_capacity(&self) -> bool {
                *self >= 0
            }
        }
    )*};
}

macro_rules! impl_capacity_float {
    ($($t:ty),*) => {$(
        impl Capacity for $t {
            fn is_valid_capacity(&self) -> bool {
                self.is_finite() && *self >= 0.0
            }
        }
    )*};
}

impl_capacity_unsigned!(u8, u16, u32, u64, usize);
impl_capacity_signed!(i8, i16, i32, i64, isize);
impl_capacity_float!(f32, f64);
