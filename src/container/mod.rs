pub mod archive;
pub mod constants;
pub mod error;

pub use archive::Archive;
pub use error::ContainerError;
