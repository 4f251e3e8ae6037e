pub mod bitstream;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod tree;

pub use bitstream::Bitstream;
pub use codec::{decode, encode, size_stats, SizeStats};
pub use codes::CodeTable;
pub use error::CodecError;
pub use frequency::FrequencyTable;
pub use tree::{CodeTree, Node};
