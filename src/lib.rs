pub mod config;
pub mod container;
pub mod engine;
pub mod utils;

pub use container::{Archive, ContainerError};
pub use engine::{CodeTable, CodeTree, CodecError, FrequencyTable};
