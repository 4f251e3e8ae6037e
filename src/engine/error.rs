use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    EmptyAlphabet,
    DegenerateTree,
    UnknownSymbol(u8),
    TruncatedStream,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EmptyAlphabet =>
                write!(f, "no symbol with positive frequency"),
            CodecError::DegenerateTree =>
                write!(f, "cannot derive codes from an absent tree"),
            CodecError::UnknownSymbol(sym) =>
                write!(f, "symbol {:#04x} has no code", sym),
            CodecError::TruncatedStream =>
                write!(f, "bitstream ended mid-traversal"),
        }
    }
}

impl std::error::Error for CodecError {}
