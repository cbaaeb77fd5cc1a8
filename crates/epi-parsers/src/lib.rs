pub mod error;
pub mod svg;
pub mod image;
pub mod vectorize;
pub mod file_parser;

pub use error::VectorizeError;
pub use file_parser::{load_source, source_from_bytes, SourceType};
pub use crate::image::ImageConfig;
pub use vectorize::{vectorize, VectorSource, VectorizeConfig};
