pub mod image_codec;
pub mod logging;
