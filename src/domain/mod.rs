pub mod archive;
pub mod builder;
pub mod catalog;
pub mod ico;
pub mod image_definition;
pub mod render;
pub mod size_request;
pub mod source_file;

// --- public re-exports ---
pub use builder::{BuildOptions, Builder, BuilderError};
pub use ico::ico_encoder::{IcoConverter, IcoEncoder};
pub use image_definition::ImageDefinition;
