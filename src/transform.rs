pub mod grayscale;
pub mod rgb;
pub mod traits;

pub mod prelude {
    pub use super::{grayscale::GrayscaleTransform, rgb::RgbTransform, traits::TextureTransform};
}
