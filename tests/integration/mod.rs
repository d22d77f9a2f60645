//! Integration tests for DAG node normalization

mod cid_roundtrip;
mod support;
