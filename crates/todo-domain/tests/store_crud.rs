use serde_json::json;
use todo_domain::{validate_create, validate_update, Todo, TodoId, TodoStore};

fn create(store: &mut TodoStore, title: &str) -> Todo {
    let input = validate_create(&json!({ "title": title })).unwrap();
    store.create(input)
}

#[test]
fn create_stores_trimmed_title_with_defaults() {
    let mut store = TodoStore::new();
    let todo = create(&mut store, "  Test Todo  ");

    assert_eq!(todo.title, "Test Todo");
    assert!(!todo.completed);
    assert!(store.list().contains(&todo));
}

#[test]
fn complete_changes_only_the_flag() {
    let mut store = TodoStore::new();
    let todo = create(&mut store, "Write docs");

    let patch = validate_update(&json!({ "completed": true })).unwrap();
    let updated = store.update(&todo.id, patch).unwrap();

    assert!(updated.completed);
    assert_eq!(updated.id, todo.id);
    assert_eq!(updated.title, todo.title);
    assert_eq!(updated.created_at, todo.created_at);
}

#[test]
fn rename_then_reopen() {
    let mut store = TodoStore::new();
    let todo = create(&mut store, "Draft");

    let patch = validate_update(&json!({ "title": " Final ", "completed": true })).unwrap();
    store.update(&todo.id, patch).unwrap();
    let patch = validate_update(&json!({ "completed": false })).unwrap();
    let reopened = store.update(&todo.id, patch).unwrap();

    assert_eq!(reopened.title, "Final");
    assert!(!reopened.completed);
}

#[test]
fn missing_ids_never_mutate_the_collection() {
    let mut store = TodoStore::new();
    create(&mut store, "A");
    create(&mut store, "B");
    let snapshot = store.list().to_vec();

    let unknown = TodoId::from("unknown-id");
    let patch = validate_update(&json!({ "completed": true })).unwrap();
    assert!(store.update(&unknown, patch).is_none());
    assert!(!store.delete(&unknown));
    assert_eq!(store.list(), snapshot.as_slice());
}

#[test]
fn delete_then_list_excludes_the_id() {
    let mut store = TodoStore::new();
    let a = create(&mut store, "A");
    let b = create(&mut store, "B");
    let c = create(&mut store, "C");

    assert!(store.delete(&b.id));
    let ids: Vec<&TodoId> = store.list().iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec![&a.id, &c.id]);
    assert!(store.get(&b.id).is_none());
}

#[test]
fn reset_gives_a_clean_slate() {
    let mut store = TodoStore::with_samples();
    create(&mut store, "Extra");
    assert_eq!(store.len(), 3);

    store.reset();
    assert!(store.list().is_empty());

    let fresh = create(&mut store, "After reset");
    assert_eq!(store.list(), &[fresh]);
}
