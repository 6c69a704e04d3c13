#![cfg(feature = "serde")]

use cowlist::prelude::*;

#[test]
fn list_serializes_as_sequence() {
    let list = CowList::from(vec![3, 1, 2]);
    list.sort();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2,3]");
    assert_eq!(serde_json::to_string(&list.snapshot()).unwrap(), "[1,2,3]");
}

#[test]
fn list_deserializes_without_reordering() {
    let list: CowList<String> = serde_json::from_str(r#"["b", "a"]"#).unwrap();
    assert_eq!(list.to_vec(), ["b", "a"]);
    assert_eq!(list.version(), 0);
}

#[test]
fn values_are_untagged() {
    let values: Vec<Value> = serde_json::from_str(r#"[true, 1, 1.5, "x"]"#).unwrap();
    assert_eq!(
        values,
        [
            Value::Bool(true),
            Value::Int(1),
            Value::Float(1.5),
            Value::Text("x".to_string())
        ]
    );
    assert_eq!(serde_json::to_string(&values).unwrap(), r#"[true,1,1.5,"x"]"#);
}
