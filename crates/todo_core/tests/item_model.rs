use todo_core::{validate_text, ItemValidationError, ToDoItem};

#[test]
fn new_item_starts_open() {
    let item = ToDoItem::new("Buy milk");

    assert_eq!(item.text, "Buy milk");
    assert!(!item.completed);
}

#[test]
fn toggle_returns_new_flag() {
    let mut item = ToDoItem::new("Buy milk");

    assert!(item.toggle());
    assert!(!item.toggle());
}

#[test]
fn validate_text_rejects_whitespace_only() {
    assert_eq!(validate_text(""), Err(ItemValidationError::EmptyText));
    assert_eq!(validate_text(" \t"), Err(ItemValidationError::EmptyText));
    assert_eq!(validate_text("  padded  "), Ok(()));
}

#[test]
fn serialization_uses_is_completed_wire_field() {
    let mut item = ToDoItem::new("Walk dog");
    item.toggle();

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!({"text": "Walk dog", "isCompleted": true}));

    let decoded: ToDoItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_prefers_is_completed_over_completed() {
    let item: ToDoItem = serde_json::from_value(
        serde_json::json!({"text": "A", "completed": true, "isCompleted": false}),
    )
    .unwrap();
    assert_eq!(item, ToDoItem::new("A"));

    let item: ToDoItem =
        serde_json::from_value(serde_json::json!({"text": "A", "completed": true})).unwrap();
    assert!(item.completed);
}

#[test]
fn deserialize_requires_completion_flag() {
    let err = serde_json::from_value::<ToDoItem>(serde_json::json!({"text": "X"})).unwrap_err();
    assert!(err.to_string().contains("isCompleted"), "unexpected error: {err}");
}
