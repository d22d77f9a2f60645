use cid::multihash::Multihash;
use cid::Cid;
use dagnorm::types::{DAG_CBOR, DAG_PB};
use dagnorm::{
    normalize, DagNode, Format, NodeType, NormalizeError, PbLink, PbNode, RawIdentifier,
    TreeValue,
};
use serde_json::json;

fn cid_v1(codec: u64, content: &[u8]) -> Cid {
    let digest = blake3::hash(content);
    let mh = Multihash::<64>::wrap(0x1e, digest.as_bytes()).unwrap();
    Cid::new_v1(codec, mh)
}

#[test]
fn dag_pb_node_with_real_identifiers() {
    let node_cid = cid_v1(DAG_PB, b"parent");
    let child_a = cid_v1(DAG_PB, b"child-a");
    let child_b = cid_v1(0x55, b"child-b");

    let node = PbNode {
        data: Some(vec![0x08, 0x02]),
        links: vec![
            PbLink::new(child_a).with_name("a").with_tsize(11),
            PbLink::new(RawIdentifier::Bytes(child_b.to_bytes())).with_tsize(22),
            PbLink::new(RawIdentifier::Bytes(vec![0xde, 0xad])),
        ],
    };

    let record = normalize(DagNode::LinkList(node), &node_cid.to_string()).unwrap();
    assert_eq!(record.cid, node_cid.to_string());
    assert_eq!(record.format, Format::NonUnixFs);
    assert_eq!(record.node_type, NodeType::Codec(DAG_PB));
    let targets: Vec<&str> = record.targets().collect();
    assert_eq!(targets, vec![child_a.to_string().as_str(), child_b.to_string().as_str(), ""]);
    assert_eq!(record.links[1].path, "Links/1");
    assert_eq!(record.links[2].path, "Links/2");
}

#[test]
fn dag_pb_identifier_in_other_base_is_canonicalized() {
    let node_cid = cid_v1(DAG_PB, b"parent");
    let base58 = node_cid
        .to_string_of_base(cid::multibase::Base::Base58Btc)
        .unwrap();
    assert_ne!(base58, node_cid.to_string());

    let record = normalize(PbNode::default().into(), &base58).unwrap();
    assert_eq!(record.cid, node_cid.to_string());
}

#[test]
fn dag_cbor_node_with_mixed_link_styles() {
    let node_cid = cid_v1(DAG_CBOR, b"root");
    let prev = cid_v1(DAG_CBOR, b"prev");
    let blob = cid_v1(0x55, b"blob");
    let legacy = cid_v1(DAG_CBOR, b"legacy");

    let mut value = TreeValue::from(json!({
        "prev": {"/": prev.to_string()},
        "parts": [{"/": "not a cid"}, {"/": {"bytes": "AAAA"}}],
        "meta": {"name": "x", "size": 3}
    }));
    if let TreeValue::Map(map) = &mut value {
        map.insert("blob".to_string(), TreeValue::marker(TreeValue::Bytes(blob.to_bytes())));
        map.insert("legacy".to_string(), TreeValue::Link(legacy));
    }

    let record = normalize(value.into(), &node_cid.to_string()).unwrap();
    assert_eq!(record.format, Format::Unknown);
    assert_eq!(record.node_type, NodeType::Codec(DAG_CBOR));
    let paths: Vec<&str> = record.links.iter().map(|l| l.path.as_str()).collect();
    assert_eq!(paths, vec!["blob", "legacy", "prev"]);
    let targets: Vec<String> = record.targets().map(str::to_string).collect();
    assert_eq!(targets, vec![blob.to_string(), legacy.to_string(), prev.to_string()]);

    let tree = record.tree().unwrap();
    assert_eq!(
        tree.get("blob").and_then(|m| m.get("/")),
        Some(&TreeValue::String(blob.to_string()))
    );
    assert_eq!(tree.get("legacy"), Some(&TreeValue::Link(legacy)));
}

#[test]
fn unparseable_identifier_falls_back_to_tree_path() {
    let record = normalize(PbNode::default().into(), "not-a-cid").unwrap();
    assert_eq!(record.format, Format::Unknown);
    assert_eq!(record.node_type, NodeType::Codec(DAG_CBOR));
    assert_eq!(record.cid, "not-a-cid");
}

#[test]
fn invalid_identifier_error_message() {
    let err = NormalizeError::InvalidIdentifier("zzz".to_string());
    assert_eq!(err.to_string(), "Invalid content identifier: zzz");
}
