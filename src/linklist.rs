//! Link-list (DAG-PB) normalization
//!
//! DAG-PB nodes already carry an explicit, ordered link list. Normalizing
//! them means canonicalizing identifiers, defaulting unnamed paths, and
//! checking whether the payload is UnixFS metadata.

use crate::error::NormalizeError;
use crate::ident::{IdentifierResolver, RawIdentifier};
use crate::record::{Format, NodeData, NodeType, NormalizedDagNode, NormalizedLink};
use crate::tree::TreeValue;
use crate::types::CodecTag;
use crate::unixfs::FsMetadataDecoder;
use std::collections::BTreeMap;
use tracing::trace;

/// One entry of a DAG-PB link list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbLink {
    pub name: Option<String>,
    pub hash: RawIdentifier,
    /// Declared cumulative size of the target subtree
    pub tsize: Option<u64>,
}

impl PbLink {
    pub fn new(hash: impl Into<RawIdentifier>) -> Self {
        Self {
            name: None,
            hash: hash.into(),
            tsize: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tsize(mut self, tsize: u64) -> Self {
        self.tsize = Some(tsize);
        self
    }
}

/// A decoded DAG-PB node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PbNode {
    pub data: Option<Vec<u8>>,
    pub links: Vec<PbLink>,
}

impl PbNode {
    /// The DAG-PB logical data model as a nested-tree value
    ///
    /// `{"Data": bytes, "Links": [{"Hash": ..., "Name": ..., "Tsize": ...}]}`,
    /// absent fields omitted.
    pub fn to_tree_value(&self) -> TreeValue {
        let links = self
            .links
            .iter()
            .map(|link| {
                let mut entry = BTreeMap::new();
                entry.insert("Hash".to_string(), TreeValue::from(&link.hash));
                if let Some(name) = &link.name {
                    entry.insert("Name".to_string(), TreeValue::String(name.clone()));
                }
                if let Some(tsize) = link.tsize {
                    entry.insert("Tsize".to_string(), TreeValue::Integer(tsize as i128));
                }
                TreeValue::Map(entry)
            })
            .collect();

        let mut node = BTreeMap::new();
        if let Some(data) = &self.data {
            node.insert("Data".to_string(), TreeValue::Bytes(data.clone()));
        }
        node.insert("Links".to_string(), TreeValue::List(links));
        TreeValue::Map(node)
    }
}

/// Normalize a DAG-PB node
///
/// Fails only when `cid` itself has no canonical form. A payload that does
/// not decode as UnixFS metadata yields a `non-unixfs` record.
pub fn normalize_link_list_node(
    node: PbNode,
    cid: &str,
    codec: CodecTag,
    resolver: &dyn IdentifierResolver,
    fs_decoder: Option<&dyn FsMetadataDecoder>,
) -> Result<NormalizedDagNode, NormalizeError> {
    let source = resolver
        .to_canonical_string(&RawIdentifier::Text(cid.to_string()))
        .ok_or_else(|| NormalizeError::InvalidIdentifier(cid.to_string()))?;

    let links = normalize_links(&node.links, &source, resolver);

    let decoded = match (&node.data, fs_decoder) {
        (Some(payload), Some(decoder)) => match decoder.decode(payload) {
            Ok(entry) => Some(entry),
            Err(e) => {
                trace!(cid = %source, error = %e, "Payload is not filesystem metadata");
                None
            }
        },
        _ => None,
    };

    let record = match decoded {
        Some(entry) => NormalizedDagNode {
            cid: source,
            node_type: NodeType::UnixFs(entry.kind),
            data: Some(NodeData::UnixFs {
                kind: entry.kind,
                payload: entry.payload,
                block_sizes: entry.block_sizes,
            }),
            links,
            format: Format::UnixFs,
            size: Some(entry.file_size),
        },
        None => NormalizedDagNode {
            cid: source,
            node_type: NodeType::Codec(codec),
            data: node.data.map(NodeData::Raw),
            links,
            format: Format::NonUnixFs,
            size: None,
        },
    };

    Ok(record)
}

/// Normalize an explicit link list
///
/// Order is kept exactly as encoded. Unnamed entries get `Links/<i>`, and
/// entries whose identifier does not resolve get an empty target.
pub fn normalize_links(
    links: &[PbLink],
    source: &str,
    resolver: &dyn IdentifierResolver,
) -> Vec<NormalizedLink> {
    links
        .iter()
        .enumerate()
        .map(|(index, link)| {
            let path = match link.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("Links/{}", index),
            };
            let target = resolver.to_canonical_string(&link.hash).unwrap_or_else(|| {
                trace!(source, index, "Link target is not a resolvable identifier");
                String::new()
            });
            NormalizedLink {
                path,
                source: source.to_string(),
                target,
                size: link.tsize.unwrap_or(0),
                index,
            }
        })
        .collect()
}
