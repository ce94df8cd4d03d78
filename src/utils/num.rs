use num_traits::{Float, ToPrimitive};

/// Clamp a working value into the 8-bit channel range and round it
/// to the nearest integer.
#[inline(always)]
pub fn to_channel<F>(value: F) -> u8
where
    F: Float,
{
    let lo = F::zero();
    let hi = F::from(u8::MAX).unwrap_or(lo);
    // NaN never shows up in a well-formed buffer, map it to black anyway
    value.max(lo).min(hi).round().to_u8().unwrap_or(0)
}

/// Round half to even, then clamp into `0..=max_index`.
///
/// Used to turn a scaled luminance into a palette index.
#[inline(always)]
pub fn clamped_index(value: f32, max_index: usize) -> usize {
    let rounded = value.round_ties_even();
    if rounded <= 0.0 {
        return 0;
    }
    rounded.to_usize().unwrap_or(max_index).min(max_index)
}
