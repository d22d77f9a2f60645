//! Core types and constants shared by the normalizers.

/// CodecTag: multicodec code carried by a content identifier
pub type CodecTag = u64;

/// DAG-PB: the link-list encoding
pub const DAG_PB: CodecTag = 0x70;

/// DAG-CBOR: the nested-tree encoding, and the fallback when a codec cannot be resolved
pub const DAG_CBOR: CodecTag = 0x71;

/// Key of the single-key map that marks a link in the nested-tree encoding
pub const LINK_MARKER: &str = "/";
