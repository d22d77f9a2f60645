use dagnorm::error::FsDecodeError;
use dagnorm::types::CodecTag;
use dagnorm::{
    FsMetadataDecoder, IdentifierResolver, Normalizer, RawIdentifier, TreeValue, UnixFsEntry,
    UnixFsKind,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolver over `bafy*` fake identifiers with an explicit codec table.
#[derive(Debug, Default)]
pub struct FakeResolver {
    codecs: HashMap<String, CodecTag>,
}

impl FakeResolver {
    pub fn with_codec(mut self, id: &str, codec: CodecTag) -> Self {
        self.codecs.insert(id.to_string(), codec);
        self
    }

    fn canonical(s: &str) -> Option<String> {
        let lower = s.to_ascii_lowercase();
        lower.starts_with("bafy").then_some(lower)
    }
}

impl IdentifierResolver for FakeResolver {
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
            _ => None,
        }
    }
}

/// Decodes payloads of the form `unixfs:<kind>:<file_size>`.
#[derive(Debug, Default)]
pub struct FakeFsDecoder;

impl FsMetadataDecoder for FakeFsDecoder {
    fn decode(&self, payload: &[u8]) -> Result<UnixFsEntry, FsDecodeError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| FsDecodeError::NotFsMetadata(e.to_string()))?;
        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            ["unixfs", kind, size] => {
                let kind: UnixFsKind = kind.parse()?;
                let file_size: u64 = size
                    .parse()
                    .map_err(|_| FsDecodeError::NotFsMetadata(text.to_string()))?;
                Ok(UnixFsEntry {
                    kind,
                    payload: None,
                    block_sizes: vec![file_size],
                    file_size,
                })
            }
            _ => Err(FsDecodeError::NotFsMetadata(text.to_string())),
        }
    }
}

pub fn fake_normalizer(resolver: FakeResolver) -> Normalizer {
    Normalizer::new(Arc::new(resolver)).with_fs_decoder(Arc::new(FakeFsDecoder))
}
