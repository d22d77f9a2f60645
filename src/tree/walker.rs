//! Structural link discovery
//!
//! Walks a nested-tree value and collects every link it finds. A link is
//! either a value the codec already decoded as an identifier, or a single-key
//! map whose key is the link marker (`{"/": ...}`). Markers that resolve are
//! rewritten in place to the identifier's canonical string, which is why the
//! walk takes `&mut TreeValue`.
//!
//! The walk uses an explicit stack bounded by [`WalkerConfig::max_depth`], so
//! adversarial nesting cannot exhaust the native stack. Nothing in the walk is
//! fatal: unresolvable markers and subtrees below the depth bound simply
//! contribute no links.

use crate::ident::IdentifierResolver;
use crate::record::NormalizedLink;
use crate::tree::TreeValue;
use crate::types::LINK_MARKER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{trace, warn};

fn default_max_depth() -> usize {
    512
}

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Maximum container nesting depth descended into (root is depth 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Pending visit on the walk stack
struct Visit<'v> {
    value: &'v mut TreeValue,
    path: String,
    depth: usize,
}

/// Find all links in `value`, with paths relative to its root
///
/// Link markers that resolve are canonicalized in place. Callers that need
/// the original marker shape must clone the value first.
pub fn find_links(
    value: &mut TreeValue,
    source: &str,
    resolver: &dyn IdentifierResolver,
    config: &WalkerConfig,
) -> Vec<NormalizedLink> {
    find_links_at(value, source, "", resolver, config)
}

/// Find all links in `value`, prefixing every path with `path`
///
/// Links come back in pre-order: map entries in key order, list elements in
/// index order. Structurally discovered links always have `size == 0` and
/// `index == 0`.
pub fn find_links_at(
    value: &mut TreeValue,
    source: &str,
    path: &str,
    resolver: &dyn IdentifierResolver,
    config: &WalkerConfig,
) -> Vec<NormalizedLink> {
    let mut links = Vec::new();
    let mut truncated: Option<String> = None;
    let mut stack = vec![Visit {
        value,
        path: path.to_string(),
        depth: 0,
    }];

    while let Some(Visit { value, path, depth }) = stack.pop() {
        match value {
            TreeValue::Link(_) => {
                if let Some(target) = resolver.to_identifier(value) {
                    links.push(structural_link(path, source, target));
                }
            }
            TreeValue::List(items) => {
                if items.is_empty() {
                    continue;
                }
                if depth >= config.max_depth {
                    truncated.get_or_insert(path);
                    continue;
                }
                for (i, item) in items.iter_mut().enumerate().rev() {
                    stack.push(Visit {
                        value: item,
                        path: join_path(&path, &i.to_string()),
                        depth: depth + 1,
                    });
                }
            }
            TreeValue::Map(map) if is_marker(map) => {
                let Some(marker) = map.get_mut(LINK_MARKER) else {
                    continue;
                };
                match resolver.to_identifier(marker) {
                    Some(target) => {
                        *marker = TreeValue::String(target.clone());
                        links.push(structural_link(path, source, target));
                    }
                    None => {
                        trace!(path = %path, kind = marker.kind(), "Ignoring unresolvable link marker");
                    }
                }
            }
            TreeValue::Map(map) => {
                if map.is_empty() {
                    continue;
                }
                if depth >= config.max_depth {
                    truncated.get_or_insert(path);
                    continue;
                }
                for (key, child) in map.iter_mut().rev() {
                    stack.push(Visit {
                        value: child,
                        path: join_path(&path, key),
                        depth: depth + 1,
                    });
                }
            }
            // Scalars, strings, and byte blobs carry no links
            _ => {}
        }
    }

    if let Some(path) = truncated {
        warn!(
            source,
            path = %path,
            max_depth = config.max_depth,
            "Link discovery stopped at maximum depth"
        );
    }

    links
}

/// A single-key map keyed by the link marker with a non-null value
fn is_marker(map: &BTreeMap<String, TreeValue>) -> bool {
    map.len() == 1
        && map
            .get(LINK_MARKER)
            .map(|value| !value.is_null())
            .unwrap_or(false)
}

fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", base, segment)
    }
}

fn structural_link(path: String, source: &str, target: String) -> NormalizedLink {
    NormalizedLink {
        path,
        source: source.to_string(),
        target,
        size: 0,
        index: 0,
    }
}
