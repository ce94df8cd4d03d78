use std::{fs::File, io::BufWriter, path::Path};

use image::{
    DynamicImage, ImageBuffer, ImageFormat, ImageReader, Luma, Rgb,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    error::{Error, Result},
    texture::{TextureRef, TextureSlice},
};

/// Decode an image file, guessing the format from its content.
pub fn read_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image)
}

pub fn write_image(image: &DynamicImage, path: impl AsRef<Path>, format: ImageFormat) -> Result {
    let file = &mut BufWriter::new(File::create(path)?);
    image.write_to(file, format)?;
    Ok(())
}

/// From a 1 or 3 plane texture construct an ImageBuffer without copying
/// and write it to file using the png encoder.
pub fn write_png_texture(texture: TextureSlice<'_, u8>, path: impl AsRef<Path>) -> Result {
    let (width, height) = (texture.width(), texture.height());
    let file = &mut BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(file, CompressionType::Best, FilterType::Adaptive);

    match texture.planes() {
        1 => ImageBuffer::<Luma<u8>, &[u8]>::from_raw(width, height, texture.as_ref())
            .ok_or(Error::InvalidDimensions { width, height })?
            .write_with_encoder(encoder)?,
        3 => ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(width, height, texture.as_ref())
            .ok_or(Error::InvalidDimensions { width, height })?
            .write_with_encoder(encoder)?,
        planes => return Err(Error::PlaneMismatch(planes)),
    }
    Ok(())
}
