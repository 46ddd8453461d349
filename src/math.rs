//! Math function wrappers for std/no_std compatibility
//!
//! Uses standard library math when available, falls back to libm for no_std.

/// 1 / sqrt(2π), the peak of the standard normal density
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

#[cfg(feature = "std")]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Standard normal probability density at `z`
///
/// Not a probability: the peak at `z = 0` is ~0.3989, and an infinite
/// `z` yields exactly 0.
#[inline]
pub fn normal_pdf(z: f64) -> f64 {
    exp(-(z * z) / 2.0) * FRAC_1_SQRT_2PI
}
