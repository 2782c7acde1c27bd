use parsekit_encode::{
    encode, EncodeError, Op, ParseDate, ParseEntity, ParseFile, ParseObject, Value, ValueMap,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn response(fields: serde_json::Value) -> ValueMap {
    match Value::from(fields) {
        Value::Map(map) => map,
        _ => ValueMap::new(),
    }
}

// ── Identity & dirtiness ─────────────────────────────────────────

#[test]
fn new_object_is_unsaved_and_dirty() {
    let o = ParseObject::new("Note");
    assert_eq!(o.class_name(), "Note");
    assert_eq!(o.object_id(), None);
    assert!(o.is_dirty());
}

#[test]
fn local_ids_are_unique() {
    assert_ne!(ParseObject::new("Note").local_id(), ParseObject::new("Note").local_id());
}

#[test]
fn saved_object_without_ops_is_clean() {
    let o = ParseObject::with_id("Note", "n1");
    assert_eq!(o.object_id().as_deref(), Some("n1"));
    assert!(!o.is_dirty());
}

#[test]
fn queued_op_makes_object_dirty() {
    let o = ParseObject::with_id("Note", "n1");
    o.increment("views", 1);
    assert!(o.is_dirty());
    assert_eq!(o.dirty_keys(), vec!["views".to_string()]);
}

#[test]
fn dirty_keys_keep_queue_order() {
    let o = ParseObject::with_id("Note", "n1");
    o.set("b", 1);
    o.unset("a");
    o.add("c", vec![Value::from(1)]);
    o.set("b", 2);
    assert_eq!(o.dirty_keys(), vec!["b", "a", "c"]);
}

// ── Field access ─────────────────────────────────────────────────

#[test]
fn get_prefers_queued_set_and_unset() {
    let o = ParseObject::with_id("Note", "n1");
    o.set_server_field("title", "old");
    o.set_server_field("body", "text");
    o.set("title", "new");
    o.unset("body");
    assert_eq!(o.get("title").and_then(|v| v.as_str().map(String::from)), Some("new".to_string()));
    assert!(o.get("body").is_none());
    assert!(o.server_data().contains_key("body"));
}

#[test]
fn get_ignores_unestimated_ops() {
    let o = ParseObject::with_id("Note", "n1");
    o.set_server_field("views", 3);
    o.increment("views", 1);
    assert!(matches!(o.get("views"), Some(Value::Int(3))));
}

#[test]
fn timestamps_read_from_server_data() {
    let o = ParseObject::with_id("Note", "n1");
    assert!(o.created_at().is_none());
    o.set_server_field("createdAt", ParseDate::from_millis(5.0));
    assert_eq!(o.created_at(), Some(ParseDate::from_millis(5.0)));
    assert!(o.updated_at().is_none());
}

// ── Pointers ─────────────────────────────────────────────────────

#[test]
fn pointer_uses_object_id_once_saved() {
    let o = ParseObject::new("Note");
    assert_eq!(
        o.to_pointer(),
        json!({ "__type": "Pointer", "className": "Note", "_localId": o.local_id() })
    );
    o.set_object_id("n1");
    assert_eq!(
        o.to_pointer(),
        json!({ "__type": "Pointer", "className": "Note", "objectId": "n1" })
    );
}

#[test]
fn debug_output_does_not_follow_cycles() {
    let o = Arc::new(ParseObject::with_id("Node", "n1"));
    o.set_server_field("self", Value::object(o.clone()));
    let printed = format!("{o:?}");
    assert!(printed.contains("Node"));
    assert!(printed.contains("n1"));
}

// ── Save payload ─────────────────────────────────────────────────

#[test]
fn save_payload_encodes_each_op() {
    let author = Arc::new(ParseObject::with_id("User", "u1"));
    author.set_server_field("name", "ann");

    let o = ParseObject::new("Note");
    o.set("title", "hello");
    o.set("author", Value::object(author));
    o.increment("views", 2);
    o.add_unique("tags", vec![Value::from("a"), Value::from("b")]);
    o.unset("draft");

    assert_eq!(
        o.save_payload().unwrap(),
        json!({
            "title": "hello",
            "author": { "__type": "Pointer", "className": "User", "objectId": "u1" },
            "views": { "__op": "Increment", "amount": 2 },
            "tags": { "__op": "AddUnique", "objects": ["a", "b"] },
            "draft": { "__op": "Delete" },
        })
    );
}

#[test]
fn save_payload_rejects_unsaved_file() {
    let o = ParseObject::new("Note");
    o.set("attachment", ParseFile::new("a.txt"));
    let err = o.save_payload().unwrap_err();
    assert!(matches!(err, EncodeError::UnsavedFile { .. }));
}

#[test]
fn empty_queue_gives_empty_payload() {
    assert_eq!(ParseObject::with_id("Note", "n1").save_payload().unwrap(), json!({}));
}

// ── Save response ────────────────────────────────────────────────

#[test]
fn save_response_assigns_identity_and_timestamps() {
    let o = ParseObject::new("Note");
    o.set("title", "hello");
    o.handle_save_response(response(json!({
        "objectId": "n1",
        "createdAt": "2015-02-03T10:20:30.123Z",
    })));

    assert_eq!(o.object_id().as_deref(), Some("n1"));
    assert!(!o.is_dirty());
    assert_eq!(
        o.created_at().and_then(|d| d.iso()).as_deref(),
        Some("2015-02-03T10:20:30.123Z")
    );
    assert!(matches!(o.server_data().get("title"), Some(Value::String(s)) if s == "hello"));
    assert!(!o.server_data().contains_key("objectId"));
}

#[test]
fn save_response_folds_unset_and_drops_other_ops() {
    let o = ParseObject::with_id("Note", "n1");
    o.set_server_field("draft", true);
    o.set_server_field("views", 1);
    o.unset("draft");
    o.increment("views", 1);
    o.handle_save_response(response(json!({ "views": 2 })));

    let data = o.server_data();
    assert!(!data.contains_key("draft"));
    assert!(matches!(data.get("views"), Some(Value::Int(2))));
    assert!(o.dirty_keys().is_empty());
}

#[test]
fn malformed_response_timestamp_is_ignored() {
    let o = ParseObject::with_id("Note", "n1");
    o.handle_save_response(response(json!({ "updatedAt": "not a date" })));
    assert!(o.updated_at().is_none());
}

#[test]
fn saved_object_embeds_with_flat_timestamps() {
    let o = Arc::new(ParseObject::new("Note"));
    o.set("title", "hello");
    o.handle_save_response(response(json!({
        "objectId": "n1",
        "createdAt": "2015-02-03T10:20:30.123Z",
        "updatedAt": "2015-02-03T10:20:30.123Z",
    })));

    assert_eq!(
        encode(&Value::object(o), false, false).unwrap(),
        json!({
            "__type": "Object",
            "className": "Note",
            "objectId": "n1",
            "title": "hello",
            "createdAt": "2015-02-03T10:20:30.123Z",
            "updatedAt": "2015-02-03T10:20:30.123Z",
        })
    );
}

#[test]
fn queue_accepts_arbitrary_ops() {
    let o = ParseObject::with_id("Note", "n1");
    o.queue("tags", Op::Remove(vec![Value::from("x")]));
    assert_eq!(
        o.save_payload().unwrap(),
        json!({ "tags": { "__op": "Remove", "objects": ["x"] } })
    );
}
