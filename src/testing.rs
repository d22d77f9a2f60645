//! Test doubles shared by unit tests.

use crate::error::FsDecodeError;
use crate::ident::{IdentifierResolver, RawIdentifier};
use crate::tree::TreeValue;
use crate::types::CodecTag;
use crate::unixfs::{FsMetadataDecoder, UnixFsEntry, UnixFsKind};
use cid::multihash::Multihash;
use cid::Cid;
use std::collections::HashMap;

/// Resolver over fake identifiers
///
/// Any string starting with `bafy` (case-insensitive) is an identifier; its
/// canonical form is the lowercased string. Real `Cid`s resolve to their
/// `Display` form. Codecs come from an explicit table.
#[derive(Debug, Default)]
pub(crate) struct StubResolver {
    codecs: HashMap<String, CodecTag>,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_codec(mut self, id: &str, codec: CodecTag) -> Self {
        self.codecs.insert(id.to_string(), codec);
        self
    }

    fn canonical(s: &str) -> Option<String> {
        let lower = s.to_ascii_lowercase();
        lower.starts_with("bafy").then_some(lower)
    }
}

impl IdentifierResolver for StubResolver {
    fn resolve_codec(&self, id: &str) -> Option<CodecTag> {
        self.codecs.get(id).copied()
    }

    fn to_canonical_string(&self, raw: &RawIdentifier) -> Option<String> {
        match raw {
            RawIdentifier::Cid(cid) => Some(cid.to_string()),
            RawIdentifier::Text(s) => Self::canonical(s),
            RawIdentifier::Bytes(bytes) => std::str::from_utf8(bytes).ok().and_then(Self::canonical),
        }
    }

    fn to_identifier(&self, value: &TreeValue) -> Option<String> {
        match value {
            TreeValue::Link(cid) => Some(cid.to_string()),
            TreeValue::String(s) => Self::canonical(s),
            TreeValue::Bytes(bytes) => std::str::from_utf8(bytes).ok().and_then(Self::canonical),
            _ => None,
        }
    }
}

/// Decoder that accepts payloads of the form `unixfs:<kind>:<file_size>`
#[derive(Debug, Default)]
pub(crate) struct StubFsDecoder;

impl FsMetadataDecoder for StubFsDecoder {
    fn decode(&self, payload: &[u8]) -> Result<UnixFsEntry, FsDecodeError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| FsDecodeError::NotFsMetadata(e.to_string()))?;
        let mut parts = text.splitn(3, ':');
        if parts.next() != Some("unixfs") {
            return Err(FsDecodeError::NotFsMetadata("missing unixfs prefix".to_string()));
        }
        let kind: UnixFsKind = parts.next().unwrap_or_default().parse()?;
        let file_size = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| FsDecodeError::NotFsMetadata("missing file size".to_string()))?;
        Ok(UnixFsEntry {
            kind,
            payload: Some(b"content".to_vec()),
            block_sizes: vec![file_size / 2, file_size - file_size / 2],
            file_size,
        })
    }
}

/// Real v1 identifier over a blake3 digest of `content`
pub(crate) fn cid_v1(codec: CodecTag, content: &[u8]) -> Cid {
    let digest = blake3::hash(content);
    let mh = Multihash::<64>::wrap(0x1e, digest.as_bytes()).expect("blake3 digest fits");
    Cid::new_v1(codec, mh)
}

/// Drop a deeply nested value without recursing
pub(crate) fn dismantle(value: TreeValue) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            TreeValue::List(items) => stack.extend(items),
            TreeValue::Map(map) => stack.extend(map.into_values()),
            _ => {}
        }
    }
}
