//! Normalization helpers shared by the accelerometer and quaternion steps

use crate::types::Normalization;

/// Magic constant of the single-iteration inverse square root
const INVERSE_SQRT_MAGIC: u32 = 0x5f37_5a86;

/// Fast inverse square root
///
/// Bit-level initial guess refined by one Newton-Raphson iteration. Relative
/// error stays below 0.2% for positive normal inputs. Returns 0 for inputs
/// that are not strictly positive.
pub fn fast_inverse_sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }

    let half_x = 0.5 * x;
    let i = INVERSE_SQRT_MAGIC - (x.to_bits() >> 1);
    let y = f32::from_bits(i);

    y * (1.5 - (half_x * y * y))
}

/// Scale factor that brings a vector with squared norm `norm_squared` to unit length.
///
/// The exact method keeps the norm and divides each component by it, the fast
/// method multiplies by the approximate inverse. Dividing rounds differently
/// from multiplying by `1 / norm`, so the two are kept apart.
pub(crate) fn unit_scale(norm_squared: f32, normalization: Normalization) -> Scale {
    match normalization {
        Normalization::Exact => Scale::DivideBy(libm::sqrtf(norm_squared)),
        Normalization::FastInverseSqrt => Scale::MultiplyBy(fast_inverse_sqrt(norm_squared)),
    }
}

/// Either a norm to divide by or an inverse norm to multiply by
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scale {
    DivideBy(f32),
    MultiplyBy(f32),
}

impl Scale {
    #[inline]
    pub(crate) fn apply(self, value: f32) -> f32 {
        match self {
            Scale::DivideBy(norm) => value / norm,
            Scale::MultiplyBy(inverse) => value * inverse,
        }
    }
}
