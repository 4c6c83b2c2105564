//! Cross-codec round-trip properties.
//!
//! Each codec must reproduce any tree it accepts, structurally equal, and
//! refuse what it cannot represent instead of mangling it.

use propstore_codec::{Codec, Error, Format};
use propstore_tree::{Map, Value};

/// Trees valid under every format.
fn common_trees() -> Vec<Value> {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from("Alice"));
    map.insert("count".to_string(), Value::Integer(-3));
    map.insert("ratio".to_string(), Value::Float(0.125));
    map.insert("flags".to_string(), Value::from(vec![true, false]));
    map.insert("empty_map".to_string(), Value::map());
    map.insert("empty_array".to_string(), Value::array());

    vec![
        Value::Bool(true),
        Value::Integer(i64::MIN),
        Value::Float(-0.456),
        Value::from("héllo wörld"),
        Value::from(vec![1i64, 2, 3]),
        Value::Map(map),
    ]
}

#[test]
fn every_format_roundtrips_its_common_subset() {
    for format in [Format::Binary, Format::Json, Format::Plist] {
        for tree in common_trees() {
            let bytes = format.encode(&tree).unwrap();
            let decoded = format.decode(&bytes).unwrap();
            assert_eq!(decoded, tree, "round-trip through {}", format);
        }
    }
}

#[test]
fn null_is_json_and_binary_only() {
    let tree = Value::Array(vec![Value::Null, Value::Integer(1)]);

    for format in [Format::Binary, Format::Json] {
        let bytes = format.encode(&tree).unwrap();
        assert_eq!(format.decode(&bytes).unwrap(), tree);
    }

    assert!(matches!(
        Format::Plist.encode(&tree),
        Err(Error::Unrepresentable { .. })
    ));
}

#[test]
fn bytes_are_binary_and_plist_only() {
    let mut map = Map::new();
    map.insert("blob".to_string(), Value::Bytes(vec![0, 1, 254, 255]));
    let tree = Value::Map(map);

    for format in [Format::Binary, Format::Plist] {
        let bytes = format.encode(&tree).unwrap();
        assert_eq!(format.decode(&bytes).unwrap(), tree, "{}", format);
    }

    assert!(matches!(
        Format::Json.encode(&tree),
        Err(Error::Unrepresentable { .. })
    ));
}

#[test]
fn acceptance_predicts_encoding() {
    let trees = [
        Value::Null,
        Value::Bytes(vec![1]),
        Value::Integer(7),
        Value::from("plain"),
    ];

    for format in [Format::Binary, Format::Json, Format::Plist] {
        let codec = format.codec();
        for tree in &trees {
            assert_eq!(
                codec.accepts(tree),
                codec.encode(tree).is_ok(),
                "{} acceptance disagrees with encode for {:?}",
                format,
                tree
            );
        }
    }
}

#[test]
fn text_formats_roundtrip_through_text() {
    let tree = common_trees().pop().unwrap();

    for format in [Format::Json, Format::Plist] {
        let text = format.encode_text(&tree).unwrap();
        assert_eq!(format.decode_text(&text).unwrap(), tree, "{}", format);
    }
}

#[test]
fn files_roundtrip_and_overwrite_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let tree = common_trees().pop().unwrap();

    for format in [Format::Binary, Format::Json, Format::Plist] {
        let path = dir.path().join(format!("tree.{}", format));

        format.write_file(&tree, &path).unwrap();
        assert_eq!(format.read_file(&path).unwrap(), tree);

        // Overwrite with different content; the replacement is whole.
        let replacement = Value::from("replaced");
        format.write_file(&replacement, &path).unwrap();
        assert_eq!(format.read_file(&path).unwrap(), replacement);
    }
}

#[test]
fn decoding_the_wrong_format_fails_cleanly() {
    let tree = Value::from(vec![1i64, 2, 3]);
    let binary = Format::Binary.encode(&tree).unwrap();

    // Binary bytes are not JSON; the error is typed, not a panic.
    assert!(matches!(
        Format::Json.decode(&binary),
        Err(Error::Malformed { .. })
    ));
}
