use tracing::{debug, error};

use crate::container::constants::{
    ARCHIVE_MAGIC, CHECKSUM_SIZE, FORMAT_VERSION, MAX_TREE_DEPTH, PRELUDE_SIZE, TREE_INTERNAL,
    TREE_LEAF,
};
use crate::container::error::ContainerError;
use crate::engine::{self, Bitstream, CodeTable, CodeTree, Node};
use crate::utils::crc::crc32;
use crate::utils::varint::{read_varint, write_varint};

/// A parsed archive: the serialized merge tree plus the packed payload.
///
/// Layout on the wire:
///
/// ```text
/// magic       [u8; 4] = "HFPK"
/// version     u16 BE
/// tree_bits   varint, then ceil(tree_bits / 8) tree bytes
/// orig_len    varint (decoded symbol count)
/// bit_len     varint, then ceil(bit_len / 8) payload bytes
/// checksum    u32 BE, crc32 of the payload bytes
/// ```
#[derive(Debug, Clone)]
pub struct Archive {
    pub tree: CodeTree,
    pub original_len: u64,
    pub payload: Bitstream,
}

impl Archive {
    /// Build a tree over `input`, encode it, and frame the result.
    pub fn compress(input: &[u8]) -> Result<Vec<u8>, ContainerError> {
        let freqs = engine::FrequencyTable::scan(input);
        let tree = CodeTree::build(&freqs)?;
        let table = CodeTable::from_tree(&tree)?;
        let payload = engine::encode(input, &table)?;

        debug!(
            input_bytes = input.len(),
            distinct_symbols = tree.leaf_count(),
            payload_bits = payload.bit_len(),
            "archive encoded"
        );

        let archive = Archive {
            tree,
            original_len: input.len() as u64,
            payload,
        };
        Ok(archive.to_bytes())
    }

    /// Parse an archive and decode its payload back to the original bytes.
    pub fn decompress(data: &[u8]) -> Result<Vec<u8>, ContainerError> {
        let archive = Archive::from_bytes(data)?;
        archive.decode_payload()
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>, ContainerError> {
        let output = engine::decode(&self.payload, &self.tree)?;
        if output.len() as u64 != self.original_len {
            // Stream decoded cleanly but to the wrong symbol count
            return Err(ContainerError::LengthMismatch {
                declared: self.original_len,
                decoded: output.len() as u64,
            });
        }
        Ok(output)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let tree_bits = serialize_tree(self.tree.root());

        let mut out = Vec::new();
        out.extend_from_slice(&ARCHIVE_MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_be_bytes());

        write_varint(tree_bits.bit_len() as u64, &mut out);
        out.extend_from_slice(tree_bits.as_bytes());

        write_varint(self.original_len, &mut out);
        write_varint(self.payload.bit_len() as u64, &mut out);
        out.extend_from_slice(self.payload.as_bytes());

        out.extend_from_slice(&crc32(self.payload.as_bytes()).to_be_bytes());
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
        if data.len() < PRELUDE_SIZE {
            return Err(ContainerError::Truncated);
        }
        if data[..4] != ARCHIVE_MAGIC {
            error!("archive magic mismatch");
            return Err(ContainerError::InvalidMagic);
        }
        let version = u16::from_be_bytes([data[4], data[5]]);
        if version != FORMAT_VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }

        let mut offset = PRELUDE_SIZE;

        let tree_bit_len = take_varint(data, &mut offset)? as usize;
        let tree_bytes = take_bytes(data, &mut offset, tree_bit_len.div_ceil(8))?;
        let tree_bits = Bitstream::from_parts(tree_bytes.to_vec(), tree_bit_len)
            .ok_or(ContainerError::Truncated)?;
        let tree = deserialize_tree(&tree_bits)?;

        let original_len = take_varint(data, &mut offset)?;
        let bit_len = take_varint(data, &mut offset)? as usize;
        let payload_bytes = take_bytes(data, &mut offset, bit_len.div_ceil(8))?;

        if data.len() < offset + CHECKSUM_SIZE {
            return Err(ContainerError::Truncated);
        }
        let expected = u32::from_be_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        let computed = crc32(payload_bytes);
        if computed != expected {
            error!(expected, computed, "archive payload checksum mismatch");
            return Err(ContainerError::ChecksumMismatch { expected, computed });
        }

        let payload = Bitstream::from_parts(payload_bytes.to_vec(), bit_len)
            .ok_or(ContainerError::Truncated)?;

        Ok(Self {
            tree,
            original_len,
            payload,
        })
    }
}

/// Pre-order tree serialization: one bit per node (0 = internal, recurse left
/// then right; 1 = leaf, followed by 8 bits of the symbol value).
fn serialize_tree(root: &Node) -> Bitstream {
    fn walk(node: &Node, out: &mut Bitstream) {
        match node {
            Node::Leaf { symbol, .. } => {
                out.push(TREE_LEAF);
                for shift in (0..8).rev() {
                    out.push((symbol >> shift) & 1 == 1);
                }
            }
            Node::Internal { left, right, .. } => {
                out.push(TREE_INTERNAL);
                walk(left, out);
                walk(right, out);
            }
        }
    }

    let mut out = Bitstream::new();
    walk(root, &mut out);
    out
}

/// Rebuild the tree from its pre-order bit string. Frequencies are not part
/// of the wire format; decode only needs the shape and the leaf symbols.
///
/// Recursion is capped at `MAX_TREE_DEPTH`: the input is untrusted, and an
/// unbounded run of internal markers must surface an error, not blow the
/// stack.
fn deserialize_tree(bits: &Bitstream) -> Result<CodeTree, ContainerError> {
    fn read_node(bits: &Bitstream, pos: &mut usize, depth: usize) -> Result<Node, ContainerError> {
        if depth > MAX_TREE_DEPTH {
            return Err(ContainerError::MalformedTree);
        }

        let marker = bits.get(*pos).ok_or(ContainerError::Truncated)?;
        *pos += 1;

        if marker == TREE_LEAF {
            let mut symbol = 0u8;
            for _ in 0..8 {
                let bit = bits.get(*pos).ok_or(ContainerError::Truncated)?;
                *pos += 1;
                symbol = (symbol << 1) | bit as u8;
            }
            Ok(Node::Leaf { symbol, freq: 0 })
        } else {
            let left = read_node(bits, pos, depth + 1)?;
            let right = read_node(bits, pos, depth + 1)?;
            Ok(Node::Internal {
                left: Box::new(left),
                right: Box::new(right),
                freq: 0,
            })
        }
    }

    let mut pos = 0;
    let root = read_node(bits, &mut pos, 0)?;
    Ok(CodeTree::from_root(root))
}

fn take_varint(data: &[u8], offset: &mut usize) -> Result<u64, ContainerError> {
    let (value, used) = read_varint(&data[*offset..]).ok_or(ContainerError::Truncated)?;
    *offset += used;
    Ok(value)
}

fn take_bytes<'a>(
    data: &'a [u8],
    offset: &mut usize,
    len: usize,
) -> Result<&'a [u8], ContainerError> {
    if data.len() < *offset + len {
        return Err(ContainerError::Truncated);
    }
    let slice = &data[*offset..*offset + len];
    *offset += len;
    Ok(slice)
}
