use image::{DynamicImage, GrayImage, ImageBuffer, RgbImage};

use crate::error::{Error, Result};

/// `(width, height, planes)`
pub type Shape = (usize, usize, usize);
/// `(width, height)`
pub type Shape2D = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer.
///
/// Buffers are row-major with planes interleaved, so the sample of plane
/// `p` at `(x, y)` lives at `(y * width + x) * planes + p`.
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn planes(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (
            self.width() as usize,
            self.height() as usize,
            self.planes() as usize,
        )
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width() as usize, self.height() as usize)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Samples of one pixel, `planes` long.
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> &[Self::Inner] {
        let (width, _, planes) = self.shape();
        let start = (y * width + x) * planes;
        &self.as_ref()[start..start + planes]
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

/// Texture with owned buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// Wrap an existing buffer.
    ///
    /// # Panics
    /// When the buffer length doesn't match `width * height * planes`.
    pub fn from_vec(width: u32, height: u32, planes: u32, buffer: Vec<T>) -> Self {
        assert_eq!(
            buffer.len(),
            width as usize * height as usize * planes as usize,
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }

    pub fn as_texture_slice(&self) -> TextureSlice<'_, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice(&mut self) -> TextureMutSlice<'_, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &mut self.buffer,
        }
    }
}

impl<T: Clone> Texture<T> {
    /// Texture where every pixel holds the same samples.
    ///
    /// # Panics
    /// When `pixel` is not exactly `planes` long.
    pub fn filled(width: u32, height: u32, pixel: &[T]) -> Self {
        let planes = pixel.len();
        assert!(planes > 0, "pixel needs at least one plane");
        let count = width as usize * height as usize;
        let mut buffer = Vec::with_capacity(count * planes);
        for _ in 0..count {
            buffer.extend_from_slice(pixel);
        }
        Self::from_vec(width, height, planes as u32, buffer)
    }
}

impl<T: Default + Copy> Texture<T> {
    pub fn new(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: vec![T::default(); width as usize * height as usize * planes as usize],
        }
    }
}

impl<T: Copy> Texture<T> {
    /// Sample-wise conversion keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Texture<U>
    where
        F: Fn(T) -> U,
    {
        Texture {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: self.buffer.iter().map(|v| f(*v)).collect(),
        }
    }
}

impl Texture<u8> {
    /// Decoded image as a luminance texture when the source has no color,
    /// an RGB texture otherwise. Alpha is dropped.
    pub fn from_dynamic_image(image: &DynamicImage) -> Self {
        if image.color().has_color() {
            image.to_rgb8().into()
        } else {
            image.to_luma8().into()
        }
    }

    /// Hand a 1 or 3 plane texture back to the codec layer.
    pub fn into_dynamic_image(self) -> Result<DynamicImage> {
        let (width, height, planes) = (self.width, self.height, self.planes);
        let image = match planes {
            1 => GrayImage::from_raw(width, height, self.buffer).map(DynamicImage::ImageLuma8),
            3 => RgbImage::from_raw(width, height, self.buffer).map(DynamicImage::ImageRgb8),
            planes => return Err(Error::PlaneMismatch(planes)),
        };
        image.ok_or(Error::InvalidDimensions { width, height })
    }
}

impl<P> From<ImageBuffer<P, Vec<u8>>> for Texture<u8>
where
    P: image::Pixel<Subpixel = u8>,
{
    fn from(value: ImageBuffer<P, Vec<u8>>) -> Self {
        let (width, height) = value.dimensions();
        Texture::from_vec(width, height, P::CHANNEL_COUNT as u32, value.into_raw())
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a mut [T],
}

impl<T> AsRef<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> AsMut<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

pub mod prelude {
    pub use super::{Shape, Texture, TextureMut, TextureMutSlice, TextureRef, TextureSlice};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_addresses_interleaved_planes() {
        let texture = Texture::from_vec(2, 2, 3, (0u8..12).collect());
        assert_eq!(texture.pixel(0, 0), &[0, 1, 2]);
        assert_eq!(texture.pixel(1, 0), &[3, 4, 5]);
        assert_eq!(texture.pixel(0, 1), &[6, 7, 8]);
        assert_eq!(texture.pixel(1, 1), &[9, 10, 11]);
    }

    #[test]
    fn test_filled_repeats_pixel() {
        let texture = Texture::filled(3, 2, &[1u8, 2, 3]);
        assert_eq!(texture.shape(), (3, 2, 3));
        assert!(texture.as_ref().chunks_exact(3).all(|p| p == [1, 2, 3]));
    }

    #[test]
    #[should_panic(expected = "buffers don't match sizes")]
    fn test_from_vec_checks_length() {
        Texture::from_vec(2, 2, 1, vec![0u8; 3]);
    }

    #[test]
    fn test_dynamic_image_round_trip_keeps_planes() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 3, image::Luma([9])));
        let texture = Texture::from_dynamic_image(&gray);
        assert_eq!(texture.shape(), (4, 3, 1));

        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, image::Rgb([1, 2, 3])));
        let texture = Texture::from_dynamic_image(&rgb);
        assert_eq!(texture.shape(), (4, 3, 3));
        let back = texture.into_dynamic_image().unwrap();
        assert_eq!(back.as_rgb8().unwrap().get_pixel(3, 2).0, [1, 2, 3]);
    }

    #[test]
    fn test_into_dynamic_image_rejects_two_planes() {
        let texture = Texture::<u8>::new(2, 2, 2);
        assert!(matches!(
            texture.into_dynamic_image(),
            Err(Error::PlaneMismatch(2))
        ));
    }
}
