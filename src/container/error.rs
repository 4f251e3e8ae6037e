use std::fmt;

use crate::engine::CodecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    InvalidMagic,
    UnsupportedVersion(u16),
    Truncated,
    MalformedTree,
    ChecksumMismatch { expected: u32, computed: u32 },
    LengthMismatch { declared: u64, decoded: u64 },
    Codec(CodecError),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::InvalidMagic =>
                write!(f, "invalid archive magic"),
            ContainerError::UnsupportedVersion(v) =>
                write!(f, "unsupported archive version {}", v),
            ContainerError::Truncated =>
                write!(f, "truncated archive"),
            ContainerError::MalformedTree =>
                write!(f, "tree section exceeds the depth of any byte-alphabet tree"),
            ContainerError::ChecksumMismatch { expected, computed } =>
                write!(f, "payload checksum mismatch: expected={:08x}, computed={:08x}", expected, computed),
            ContainerError::LengthMismatch { declared, decoded } =>
                write!(f, "archive declares {} symbols but payload decodes to {}", declared, decoded),
            ContainerError::Codec(e) =>
                write!(f, "codec error: {}", e),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for ContainerError {
    fn from(e: CodecError) -> Self {
        ContainerError::Codec(e)
    }
}
