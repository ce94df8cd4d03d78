use crate::{
    prelude::TextureTransform,
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
};

/// Widens an 8-bit texture (1, 3 or 4 planes) into a 3-plane `f32` RGB
/// working buffer. Gray inputs are replicated into all three channels and
/// alpha is dropped. Palette algorithms start from this buffer.
#[derive(Debug, Default)]
pub struct RgbTransform {}

impl TextureTransform for RgbTransform {
    type Input = u8;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let planes = input.planes() as usize;
        output
            .as_mut()
            .chunks_exact_mut(3)
            .zip(input.as_ref().chunks_exact(planes))
            .for_each(|(out_pixel, in_pixel)| match planes {
                1 => out_pixel.fill(in_pixel[0] as f32),
                _ => out_pixel
                    .iter_mut()
                    .zip(in_pixel)
                    .for_each(|(dst, src)| *dst = *src as f32),
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, out_shape: Shape) {
        debug_assert_eq!(out_shape.2, 3, "rgb output needs three planes");
    }
}
