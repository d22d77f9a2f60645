//! Format Dispatch
//!
//! Entry point for normalization. Picks the link-list path for DAG-PB nodes
//! and the structural path for everything else, so callers get one record
//! shape no matter which encoding the node came from.

use crate::config::NormalizerConfig;
use crate::error::{ConfigError, NormalizeError};
use crate::ident::{CidResolver, IdentifierResolver};
use crate::linklist::{normalize_link_list_node, PbNode};
use crate::record::{build_tree_record, NormalizedDagNode};
use crate::tree::{find_links, TreeValue, WalkerConfig};
use crate::types::{DAG_CBOR, DAG_PB};
use crate::unixfs::FsMetadataDecoder;
use std::sync::Arc;
use tracing::debug;

/// A decoded node, tagged by the shape its decoder produced
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Explicit link list with optional payload (DAG-PB)
    LinkList(PbNode),
    /// Arbitrary nested value with structurally marked links (DAG-CBOR)
    Tree(TreeValue),
}

impl From<PbNode> for DagNode {
    fn from(node: PbNode) -> Self {
        DagNode::LinkList(node)
    }
}

impl From<TreeValue> for DagNode {
    fn from(value: TreeValue) -> Self {
        DagNode::Tree(value)
    }
}

/// Normalizer over a set of collaborators
///
/// Holds no per-call state; one instance can serve any number of threads.
#[derive(Clone)]
pub struct Normalizer {
    resolver: Arc<dyn IdentifierResolver>,
    fs_decoder: Option<Arc<dyn FsMetadataDecoder>>,
    walker: WalkerConfig,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(CidResolver::new()))
    }
}

impl Normalizer {
    /// Create a normalizer without a filesystem metadata decoder
    pub fn new(resolver: Arc<dyn IdentifierResolver>) -> Self {
        Self {
            resolver,
            fs_decoder: None,
            walker: WalkerConfig::default(),
        }
    }

    /// Create a normalizer using loaded configuration
    ///
    /// The configuration is validated first, so hand-built values get the
    /// same checks as those read through `ConfigLoader`.
    pub fn from_config(
        config: &NormalizerConfig,
        resolver: Arc<dyn IdentifierResolver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(resolver).with_walker_config(config.walker.clone()))
    }

    pub fn with_fs_decoder(mut self, decoder: Arc<dyn FsMetadataDecoder>) -> Self {
        self.fs_decoder = Some(decoder);
        self
    }

    pub fn with_walker_config(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    pub fn walker_config(&self) -> &WalkerConfig {
        &self.walker
    }

    /// Normalize a decoded node fetched under `cid`
    ///
    /// An unresolvable codec falls back to the structural path with the
    /// DAG-CBOR tag. A link-list node whose identifier does not carry the
    /// DAG-PB codec is normalized structurally through its logical tree form.
    ///
    /// The node is consumed; for tree nodes the returned `data` is the same
    /// value with its link markers canonicalized.
    pub fn normalize(&self, node: DagNode, cid: &str) -> Result<NormalizedDagNode, NormalizeError> {
        let record = self.dispatch(node, cid)?;
        debug!(
            cid,
            format = record.format.as_str(),
            links = record.links.len(),
            "Normalized node"
        );
        Ok(record)
    }

    fn dispatch(&self, node: DagNode, cid: &str) -> Result<NormalizedDagNode, NormalizeError> {
        let codec = self.resolver.resolve_codec(cid);

        match (codec, node) {
            (Some(DAG_PB), DagNode::LinkList(pb)) => {
                debug!(cid, links = pb.links.len(), "Normalizing link-list node");
                normalize_link_list_node(
                    pb,
                    cid,
                    DAG_PB,
                    self.resolver.as_ref(),
                    self.fs_decoder.as_deref(),
                )
            }
            (codec, node) => {
                let codec = codec.unwrap_or(DAG_CBOR);
                let mut value = match node {
                    DagNode::Tree(value) => value,
                    DagNode::LinkList(pb) => {
                        debug!(cid, codec, "Link-list node under non DAG-PB codec, using tree form");
                        pb.to_tree_value()
                    }
                };
                debug!(cid, codec, "Walking nested-tree node");
                let links = find_links(&mut value, cid, self.resolver.as_ref(), &self.walker);
                Ok(build_tree_record(cid, codec, value, links))
            }
        }
    }
}

/// Normalize with the `cid`-crate resolver and default configuration
///
/// No filesystem metadata decoder is attached, so DAG-PB nodes come back as
/// `non-unixfs`.
pub fn normalize(node: DagNode, cid: &str) -> Result<NormalizedDagNode, NormalizeError> {
    Normalizer::default().normalize(node, cid)
}
