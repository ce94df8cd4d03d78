/// Side of the ordered dithering tile.
pub const BAYER_SIDE: usize = 4;

/// 4x4 Bayer index matrix, row-major.
#[rustfmt::skip]
pub const BAYER_4X4: [u8; BAYER_SIDE * BAYER_SIDE] = [
     0,  8,  2, 10,
    12,  4, 14,  6,
     3, 11,  1,  9,
    15,  7, 13,  5,
];

/// [BAYER_4X4] divided by 16, so values span `0.0..=0.9375`.
pub fn bayer_normalized() -> Vec<f32> {
    BAYER_4X4.iter().map(|v| *v as f32 / 16.0).collect()
}
