//! Nested-tree values and structural link discovery.

pub mod value;
pub mod walker;

pub use value::TreeValue;
pub use walker::{find_links, find_links_at, WalkerConfig};
