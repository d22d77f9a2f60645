//! Configuration sources, layered by `MergeService`.

pub mod environment;
pub mod file;
