//! Binary snapshots of condition trees.
//!
//! A snapshot is a 32-byte fixed header followed by a bincode-encoded payload.
//! The payload is a pre-order table of flat node records (numeric codes,
//! optional fields and a child count), the same shape an on-ledger node table
//! uses. Decoding rebuilds the tree from the table with an explicit stack and
//! re-runs every node invariant before a tree is handed back. Trees nested
//! deeper than [`MAX_DEPTH`] are rejected.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"CNDT"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Crate version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! ## Versioning
//!
//! The format version in the header must match exactly. If it does not,
//! decoding fails with [`DeserializeError::IncompatibleVersion`]. The crate
//! version is informational only.

use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NodeBody, NodeParts};
use crate::{
    ConditionNode, ExpressionKind, LogicalOperator, NodeKind, Param, UnknownCode, ValidationError,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MAGIC: &[u8; 4] = b"CNDT";
const FORMAT_VERSION: u16 = 1;
const CRATE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

/// Deepest nesting a decoded tree may have. A leaf has depth 0.
pub const MAX_DEPTH: usize = 1024;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when encoding a condition tree to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode condition tree: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("payload of {0} bytes exceeds the 4 GiB snapshot limit")]
    TooLarge(usize),
}

/// Errors that can occur when decoding a condition tree from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a condition snapshot: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, crate supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),

    #[error("invalid node in snapshot: {0}")]
    Validation(#[from] ValidationError),

    #[error("metadata says {expected} nodes but payload has {actual}")]
    NodeCountMismatch { expected: usize, actual: usize },

    #[error("condition tree nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("node table does not describe exactly one tree")]
    MalformedTable,
}

// ---------------------------------------------------------------------------
// Serialized type hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SerializedTree {
    metadata: TreeMetadata,
    /// Nodes in pre-order; each operator is followed by its subtrees.
    nodes: Vec<SerializedNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TreeMetadata {
    node_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializedNode {
    node_type: u8,
    logical_operator: Option<u8>,
    expression: Option<u8>,
    parameters: Vec<SerializedParam>,
    boolean_value: Option<bool>,
    child_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum SerializedParam {
    Int(i64),
    Str(String),
    /// Sign byte (0 = minus, 1 = zero, 2 = plus) followed by the little-endian
    /// magnitude.
    BigInt(u8, Vec<u8>),
}

// ---------------------------------------------------------------------------
// Param conversion
// ---------------------------------------------------------------------------

fn serialize_param(param: &Param) -> SerializedParam {
    match param {
        Param::Int(v) => SerializedParam::Int(*v),
        Param::Str(v) => SerializedParam::Str(v.clone()),
        Param::BigInt(v) => {
            let (sign, magnitude) = v.to_bytes_le();
            let sign = match sign {
                Sign::Minus => 0,
                Sign::NoSign => 1,
                Sign::Plus => 2,
            };
            SerializedParam::BigInt(sign, magnitude)
        }
    }
}

fn deserialize_param(param: SerializedParam) -> Result<Param, DeserializeError> {
    Ok(match param {
        SerializedParam::Int(v) => Param::Int(v),
        SerializedParam::Str(v) => Param::Str(v),
        SerializedParam::BigInt(sign, magnitude) => {
            let sign = match sign {
                0 => Sign::Minus,
                1 => Sign::NoSign,
                2 => Sign::Plus,
                code => {
                    return Err(UnknownCode {
                        kind: "big integer sign",
                        code,
                    }
                    .into())
                }
            };
            Param::BigInt(BigInt::from_bytes_le(sign, &magnitude))
        }
    })
}

// ---------------------------------------------------------------------------
// ConditionNode -> node table
// ---------------------------------------------------------------------------

fn node_to_serialized(node: &ConditionNode) -> SerializedNode {
    let mut out = SerializedNode {
        node_type: node.kind().code(),
        logical_operator: None,
        expression: None,
        parameters: Vec::new(),
        boolean_value: None,
        child_count: node.children().len(),
    };
    match &node.body {
        NodeBody::Expression {
            predicate,
            parameters,
        } => {
            out.expression = Some(predicate.code());
            out.parameters = parameters.iter().map(serialize_param).collect();
        }
        NodeBody::Operator { operator, .. } => out.logical_operator = Some(operator.code()),
        NodeBody::Boolean(value) => out.boolean_value = Some(*value),
    }
    out
}

// ---------------------------------------------------------------------------
// Node table -> ConditionNode
// ---------------------------------------------------------------------------

/// Operator record whose subtrees are still being read.
struct OpenNode {
    parts: NodeParts,
    remaining: usize,
}

fn serialized_to_parts(ser: SerializedNode) -> Result<NodeParts, DeserializeError> {
    Ok(NodeParts {
        kind: NodeKind::try_from(ser.node_type)?,
        predicate: ser.expression.map(ExpressionKind::try_from).transpose()?,
        operator: ser
            .logical_operator
            .map(LogicalOperator::try_from)
            .transpose()?,
        parameters: ser
            .parameters
            .into_iter()
            .map(deserialize_param)
            .collect::<Result<_, _>>()?,
        boolean_value: ser.boolean_value,
        children: Vec::new(),
    })
}

fn rebuild(table: Vec<SerializedNode>) -> Result<ConditionNode, DeserializeError> {
    let mut open: Vec<OpenNode> = Vec::new();
    let mut root = None;

    for record in table {
        if root.is_some() {
            return Err(DeserializeError::MalformedTable);
        }
        if open.len() > MAX_DEPTH {
            return Err(DeserializeError::TooDeep { limit: MAX_DEPTH });
        }

        let remaining = record.child_count;
        let parts = serialized_to_parts(record)?;
        if remaining > 0 {
            open.push(OpenNode { parts, remaining });
            continue;
        }

        // Attach the finished node, closing every parent it completes.
        let mut node = crate::validate::assemble(parts)?;
        loop {
            match open.last_mut() {
                None => {
                    root = Some(node);
                    break;
                }
                Some(parent) => {
                    parent.parts.children.push(node);
                    parent.remaining -= 1;
                    if parent.remaining > 0 {
                        break;
                    }
                }
            }
            let Some(done) = open.pop() else {
                break;
            };
            node = crate::validate::assemble(done.parts)?;
        }
    }

    if !open.is_empty() {
        return Err(DeserializeError::MalformedTable);
    }
    root.ok_or(DeserializeError::MalformedTable)
}

// ---------------------------------------------------------------------------
// Header I/O
// ---------------------------------------------------------------------------

fn write_header(buf: &mut Vec<u8>, payload: &[u8]) -> Result<(), SerializeError> {
    let payload_len =
        u32::try_from(payload.len()).map_err(|_| SerializeError::TooLarge(payload.len()))?;
    let hash = blake3::hash(payload);

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&CRATE_VERSION.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // flags (reserved)
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&hash.as_bytes()[..16]);
    Ok(())
}

#[allow(clippy::cast_possible_truncation)] // HEADER_SIZE is 32, always fits in u32
fn read_header(bytes: &[u8]) -> Result<(u16, u32, [u8; 16]), DeserializeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializeError::LengthMismatch {
            expected: HEADER_SIZE as u32,
            actual: bytes.len(),
        });
    }

    if &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let format_version = u16::from_le_bytes([bytes[4], bytes[5]]);
    // bytes[6..8] is the crate version, bytes[8..12] the reserved flags
    let payload_len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

    let mut hash = [0u8; 16];
    hash.copy_from_slice(&bytes[16..32]);

    Ok((format_version, payload_len, hash))
}

// ---------------------------------------------------------------------------
// Public encode/decode
// ---------------------------------------------------------------------------

pub(crate) fn encode(root: &ConditionNode) -> Result<Vec<u8>, SerializeError> {
    let serialized = SerializedTree {
        metadata: TreeMetadata {
            node_count: root.node_count(),
        },
        nodes: root.preorder().map(node_to_serialized).collect(),
    };
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    write_header(&mut buf, &payload)?;
    buf.extend_from_slice(&payload);
    tracing::debug!(
        bytes = buf.len(),
        nodes = serialized.metadata.node_count,
        "encoded condition snapshot"
    );
    Ok(buf)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<ConditionNode, DeserializeError> {
    let (format_version, payload_len, stored_hash) = read_header(bytes)?;

    if format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_end = HEADER_SIZE + payload_len as usize;
    if bytes.len() < payload_end {
        return Err(DeserializeError::LengthMismatch {
            expected: payload_len,
            actual: bytes.len() - HEADER_SIZE,
        });
    }
    let payload = &bytes[HEADER_SIZE..payload_end];

    if blake3::hash(payload).as_bytes()[..16] != stored_hash {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedTree, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;

    let expected = serialized.metadata.node_count;
    let actual = serialized.nodes.len();
    if actual != expected {
        return Err(DeserializeError::NodeCountMismatch { expected, actual });
    }
    let root = rebuild(serialized.nodes).inspect_err(|err| {
        tracing::debug!(error = %err, "rejected condition snapshot");
    })?;
    tracing::debug!(nodes = actual, "decoded condition snapshot");
    Ok(root)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
