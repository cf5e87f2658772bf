pub mod angle;
pub mod image;
pub mod loaders;
pub mod quality;
pub mod ratio;
pub mod style;

pub use angle::CINEMATIC_ANGLES;
pub use image::{
    GeneratedResult, ResultPatch, ResultStatus, Selection, SourceFile, UserImage,
};
pub use loaders::load_all_images;
pub use quality::Quality;
pub use ratio::AspectRatio;
pub use style::StyleType;
