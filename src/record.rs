//! Normalized node records
//!
//! The uniform output shape shared by both encodings, and the record builder
//! for nodes whose links were found structurally.

use crate::tree::TreeValue;
use crate::types::CodecTag;
use crate::unixfs::UnixFsKind;
use serde::Serialize;

/// One outgoing edge from a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedLink {
    /// Location of the link inside its source node
    pub path: String,
    /// Canonical identifier of the owning node
    pub source: String,
    /// Canonical identifier of the link target, empty if unresolvable
    pub target: String,
    /// Declared byte size of the linked subtree
    pub size: u64,
    /// Ordinal position among the node's links
    pub index: usize,
}

/// Format classification of a normalized node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Format {
    #[serde(rename = "unixfs")]
    UnixFs,
    #[serde(rename = "non-unixfs")]
    NonUnixFs,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::UnixFs => "unixfs",
            Format::NonUnixFs => "non-unixfs",
            Format::Unknown => "unknown",
        }
    }
}

/// Type tag of a normalized node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeType {
    Codec(CodecTag),
    UnixFs(UnixFsKind),
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    /// Opaque DAG-PB payload
    Raw(Vec<u8>),
    /// DAG-PB payload decoded as UnixFS metadata
    #[serde(rename_all = "camelCase")]
    UnixFs {
        kind: UnixFsKind,
        payload: Option<Vec<u8>>,
        block_sizes: Vec<u64>,
    },
    /// Nested-tree value with its link markers canonicalized
    Tree(TreeValue),
}

/// A node in the uniform shape, regardless of its encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDagNode {
    pub cid: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: Option<NodeData>,
    pub links: Vec<NormalizedLink>,
    pub format: Format,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl NormalizedDagNode {
    /// Borrow the nested-tree value, if this node came from the nested-tree path
    pub fn tree(&self) -> Option<&TreeValue> {
        match &self.data {
            Some(NodeData::Tree(value)) => Some(value),
            _ => None,
        }
    }

    /// Targets of all links, in link order
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.target.as_str())
    }
}

/// Assemble the record for a nested-tree node
///
/// `cid` is kept exactly as given. `size` is the sum of the discovered link
/// sizes, `0` when there are none.
pub fn build_tree_record(
    cid: &str,
    codec: CodecTag,
    value: TreeValue,
    links: Vec<NormalizedLink>,
) -> NormalizedDagNode {
    let size = links.iter().map(|link| link.size).sum();
    NormalizedDagNode {
        cid: cid.to_string(),
        node_type: NodeType::Codec(codec),
        data: Some(NodeData::Tree(value)),
        links,
        format: Format::Unknown,
        size: Some(size),
    }
}
