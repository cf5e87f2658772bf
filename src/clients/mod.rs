pub mod gemini_client;
pub mod image_generator;

pub use gemini_client::GeminiClient;
pub use image_generator::{GenerationRequest, ImageGenerator};
