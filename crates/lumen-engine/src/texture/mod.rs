//! Image decoding and CPU-side texture preparation.
//!
//! Pixels are converted to the surface's native channel order before upload
//! when possible. When that fails the image is uploaded as plain RGBA8
//! instead; a texture is produced either way.

mod convert;
mod load;

pub use convert::{optimize_for, prepare_upload, ConvertError, TextureUpload};
pub use load::load_image;
