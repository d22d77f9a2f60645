//! Identifier resolution
//!
//! The normalizers never parse identifiers themselves. They go through
//! [`IdentifierResolver`] for codec lookup and canonical string forms.
//! [`CidResolver`] implements it with the `cid` crate.

use cid::Cid;

use crate::tree::TreeValue;
use crate::types::CodecTag;

/// An identifier as a decoder hands it over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIdentifier {
    /// Already parsed by the decoder
    Cid(Cid),
    /// Binary identifier bytes
    Bytes(Vec<u8>),
    /// String form, any multibase
    Text(String),
}

impl From<Cid> for RawIdentifier {
    fn from(cid: Cid) -> Self {
        RawIdentifier::Cid(cid)
    }
}

impl From<&str> for RawIdentifier {
    fn from(s: &str) -> Self {
        RawIdentifier::Text(s.to_string())
    }
}

impl From<Vec<u8>> for RawIdentifier {
    fn from(bytes: Vec<u8>) -> Self {
        RawIdentifier::Bytes(bytes)
    }
}

impl From<&RawIdentifier> for TreeValue {
    fn from(raw: &RawIdentifier) -> Self {
        match raw {
            RawIdentifier::Cid(cid) => TreeValue::Link(*cid),
            RawIdentifier::Bytes(bytes) => TreeValue::Bytes(bytes.clone()),
            RawIdentifier::Text(s) => TreeValue::String(s.clone()),
        }
    }
}

/// Identifier resolution seam
///
/// Every method fails softly with `None`; callers decide whether that is fatal.
pub trait IdentifierResolver: Send + Sync {
    /// Codec tag carried by an identifier string
    fn resolve_codec(&self, id: &str) -> Option<CodecTag>;

    /// Canonical string form of a raw identifier
    fn to_canonical_string(&self, raw: &RawIdentifier) -> Option<String>;

    /// Interpret an arbitrary tree value as an identifier, returning its canonical string form
    fn to_identifier(&self, value: &TreeValue) -> Option<String>;
}

/// [`IdentifierResolver`] backed by the `cid` crate
///
/// Canonical form is the `cid` crate's `Display`: base58btc for v0,
/// lowercase base32 for v1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CidResolver;

impl CidResolver {
    pub fn new() -> Self {
        CidResolver
    }

    fn parse(&self, raw: &RawIdentifier) -> Option<Cid> {
        match raw {
            RawIdentifier::Cid(cid) => Some(*cid),
            RawIdentifier::Bytes(bytes) => Cid::try_from(bytes.as_slice()).ok(),
            RawIdentifier::Text(s) => Cid::try_from(s.as_str()).ok(),
        }
    }
}

impl IdentifierResolver for CidResolver {
    fn resolve_codec(&self, id: &str) -> Option<CodecTag> {
        Cid::try_from(id).ok().map(|cid| cid.codec())
    }

    fn to_canonical_string(&self, raw: &RawIdentifier) -> Option<String> {
        self.parse(raw).map(|cid| cid.to_string())
    }

    fn to_identifier(&self, value: &TreeValue) -> Option<String> {
        let cid = match value {
            TreeValue::Link(cid) => *cid,
            TreeValue::String(s) => Cid::try_from(s.as_str()).ok()?,
            TreeValue::Bytes(bytes) => Cid::try_from(bytes.as_slice()).ok()?,
            _ => return None,
        };
        Some(cid.to_string())
    }
}
