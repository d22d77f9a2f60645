//! Filesystem metadata seam
//!
//! A DAG-PB payload may carry UnixFS metadata. Decoding it is delegated to a
//! [`FsMetadataDecoder`]; failure only means the node has no filesystem
//! semantics.

use crate::error::FsDecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UnixFS entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnixFsKind {
    Raw,
    Directory,
    File,
    Metadata,
    Symlink,
    HamtShardedDirectory,
}

impl UnixFsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnixFsKind::Raw => "raw",
            UnixFsKind::Directory => "directory",
            UnixFsKind::File => "file",
            UnixFsKind::Metadata => "metadata",
            UnixFsKind::Symlink => "symlink",
            UnixFsKind::HamtShardedDirectory => "hamt-sharded-directory",
        }
    }
}

impl fmt::Display for UnixFsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnixFsKind {
    type Err = FsDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(UnixFsKind::Raw),
            "directory" => Ok(UnixFsKind::Directory),
            "file" => Ok(UnixFsKind::File),
            "metadata" => Ok(UnixFsKind::Metadata),
            "symlink" => Ok(UnixFsKind::Symlink),
            "hamt-sharded-directory" => Ok(UnixFsKind::HamtShardedDirectory),
            other => Err(FsDecodeError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Decoded UnixFS metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixFsEntry {
    pub kind: UnixFsKind,
    /// Inline file content, if any
    pub payload: Option<Vec<u8>>,
    pub block_sizes: Vec<u64>,
    /// Declared size of the whole file
    pub file_size: u64,
}

/// Filesystem metadata decoding seam
pub trait FsMetadataDecoder: Send + Sync {
    fn decode(&self, payload: &[u8]) -> Result<UnixFsEntry, FsDecodeError>;
}
