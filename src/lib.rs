//! dagnorm: Uniform DAG Node Shapes
//!
//! Normalizes decoded content-addressed graph nodes into one record shape,
//! whichever encoding they came from. DAG-PB nodes carry an explicit link
//! list (and maybe UnixFS metadata); DAG-CBOR nodes hide links anywhere in a
//! nested value behind `{"/": ...}` markers. Both come out as a
//! [`NormalizedDagNode`] with a flat, ordered list of [`NormalizedLink`]s.
//!
//! ```no_run
//! use dagnorm::{normalize, DagNode, TreeValue};
//!
//! let value = TreeValue::from(serde_json::json!({
//!     "prev": {"/": "bafyreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy"}
//! }));
//! let node = normalize(DagNode::Tree(value), "bafyreib2rxk3rybloqtqwbo").unwrap();
//! for link in &node.links {
//!     println!("{} -> {}", link.path, link.target);
//! }
//! ```

pub mod config;
pub mod error;
pub mod ident;
pub mod linklist;
pub mod logging;
pub mod normalize;
pub mod record;
pub mod tree;
pub mod types;
pub mod unixfs;

#[cfg(test)]
mod testing;

pub use error::NormalizeError;
pub use ident::{CidResolver, IdentifierResolver, RawIdentifier};
pub use linklist::{PbLink, PbNode};
pub use normalize::{normalize, DagNode, Normalizer};
pub use record::{Format, NodeData, NodeType, NormalizedDagNode, NormalizedLink};
pub use tree::{TreeValue, WalkerConfig};
pub use unixfs::{FsMetadataDecoder, UnixFsEntry, UnixFsKind};
