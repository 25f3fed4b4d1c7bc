/*
 * Responsibility
 * - todos のインメモリ保存 (id 昇順で安定した listing)
 * - 作成・全文置換更新・完了遷移・削除と bulk 削除
 * - 完了/一括削除は 1 つの write lock 内で行う
 */
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a todo. Shape validation is the caller's
/// concern; the store accepts what it is given.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Full-replacement update payload. `done` is tri-state: `None` leaves the
/// flag untouched, `Some(v)` overwrites it in either direction.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub done: Option<bool>,
}

/// Outcome of a `complete` call.
///
/// The two failure cases map to distinct HTTP statuses (404 vs 409), so they
/// are kept apart here instead of collapsing into one absent result.
#[derive(Debug, Clone)]
pub enum CompleteOutcome {
    Completed(Todo),
    NotFound,
    AlreadyDone,
}

/// In-memory todo store.
///
/// A `BTreeMap` keeps `find_all` stable (ascending id) for a given store
/// state. The id counter is monotone; ids are never reused, even after
/// deletion.
pub struct TodoStore {
    todos: RwLock<BTreeMap<i64, Todo>>,
    id_generator: AtomicI64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(BTreeMap::new()),
            id_generator: AtomicI64::new(1),
        }
    }

    pub fn create(&self, fields: NewTodo) -> Todo {
        let id = self.id_generator.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();

        let todo = Todo {
            id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            done: false,
            created_at: now,
            updated_at: now,
        };

        self.todos.write().insert(id, todo.clone());
        todo
    }

    /// Create one todo per input element, preserving input order.
    ///
    /// `create` cannot fail, so there is no partial-success state to roll
    /// back.
    pub fn create_batch(&self, batch: Vec<NewTodo>) -> Vec<Todo> {
        batch.into_iter().map(|fields| self.create(fields)).collect()
    }

    pub fn find_all(&self) -> Vec<Todo> {
        self.todos.read().values().cloned().collect()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Todo> {
        self.todos.read().get(&id).cloned()
    }

    pub fn exists_by_id(&self, id: i64) -> bool {
        self.todos.read().contains_key(&id)
    }

    /// Full replacement of the mutable fields; bumps `updated_at`.
    pub fn update(&self, id: i64, fields: TodoUpdate) -> Option<Todo> {
        let mut todos = self.todos.write();
        let todo = todos.get_mut(&id)?;

        todo.title = fields.title;
        todo.description = fields.description;
        todo.due_date = fields.due_date;
        if let Some(done) = fields.done {
            todo.done = done;
        }
        todo.updated_at = Utc::now();

        Some(todo.clone())
    }

    /// Transition a todo to done. The lookup, the done-check, and the write
    /// happen under one write lock, so concurrent callers see exactly one
    /// `Completed` outcome per todo.
    pub fn complete(&self, id: i64) -> CompleteOutcome {
        let mut todos = self.todos.write();
        let Some(todo) = todos.get_mut(&id) else {
            return CompleteOutcome::NotFound;
        };

        if todo.done {
            return CompleteOutcome::AlreadyDone;
        }

        todo.done = true;
        todo.updated_at = Utc::now();

        CompleteOutcome::Completed(todo.clone())
    }

    pub fn is_completed(&self, id: i64) -> bool {
        self.todos.read().get(&id).is_some_and(|t| t.done)
    }

    pub fn delete(&self, id: i64) -> bool {
        self.todos.write().remove(&id).is_some()
    }

    /// Remove every done todo; returns how many were removed.
    ///
    /// The scan and the removals share one write lock, so a todo whose done
    /// flag flips mid-operation cannot be half-removed. The qualifying ids
    /// are snapshotted first to keep iteration and mutation apart.
    pub fn delete_completed(&self) -> usize {
        let mut todos = self.todos.write();

        let completed_ids: Vec<i64> = todos
            .iter()
            .filter(|(_, todo)| todo.done)
            .map(|(id, _)| *id)
            .collect();

        for id in &completed_ids {
            todos.remove(id);
        }

        completed_ids.len()
    }

    pub fn count(&self) -> usize {
        self.todos.read().len()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            due_date: None,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = TodoStore::new();

        let a = store.create(new_todo("A"));
        let b = store.create(new_todo("B"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(!a.done);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let store = TodoStore::new();

        let a = store.create(new_todo("A"));
        assert!(store.delete(a.id));

        let b = store.create(new_todo("B"));
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_create_batch_preserves_order() {
        let store = TodoStore::new();

        let created = store.create_batch(vec![new_todo("x"), new_todo("y"), new_todo("z")]);
        let titles: Vec<&str> = created.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "y", "z"]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_find_all_stable_ascending() {
        let store = TodoStore::new();

        store.create(new_todo("A"));
        store.create(new_todo("B"));
        store.create(new_todo("C"));

        let ids: Vec<i64> = store.find_all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_replaces_fields_and_bumps_updated_at() {
        let store = TodoStore::new();
        let created = store.create(new_todo("before"));

        let updated = store
            .update(
                created.id,
                TodoUpdate {
                    title: "after".to_string(),
                    description: Some("desc".to_string()),
                    due_date: None,
                    done: Some(true),
                },
            )
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert!(updated.done);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_without_done_keeps_flag() {
        let store = TodoStore::new();
        let created = store.create(new_todo("t"));
        assert!(matches!(
            store.complete(created.id),
            CompleteOutcome::Completed(_)
        ));

        let updated = store
            .update(
                created.id,
                TodoUpdate {
                    title: "t2".to_string(),
                    description: None,
                    due_date: None,
                    done: None,
                },
            )
            .unwrap();
        assert!(updated.done);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = TodoStore::new();
        store.create(new_todo("t"));

        let result = store.update(
            42,
            TodoUpdate {
                title: "nope".to_string(),
                description: None,
                due_date: None,
                done: None,
            },
        );
        assert!(result.is_none());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_complete_once_then_conflict() {
        let store = TodoStore::new();
        let created = store.create(new_todo("t"));

        match store.complete(created.id) {
            CompleteOutcome::Completed(todo) => assert!(todo.done),
            other => panic!("expected Completed, got {other:?}"),
        }
        assert!(store.is_completed(created.id));

        assert!(matches!(
            store.complete(created.id),
            CompleteOutcome::AlreadyDone
        ));
        assert!(matches!(store.complete(999), CompleteOutcome::NotFound));
    }

    #[test]
    fn test_concurrent_complete_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(TodoStore::new());
        let id = store.create(new_todo("contended")).id;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    matches!(store.complete(id), CompleteOutcome::Completed(_))
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(successes, 1);
        assert!(store.is_completed(id));
    }

    #[test]
    fn test_delete() {
        let store = TodoStore::new();
        let created = store.create(new_todo("t"));

        assert!(store.delete(created.id));
        assert!(!store.delete(created.id));
        assert!(!store.exists_by_id(created.id));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_delete_completed_removes_exactly_done_subset() {
        let store = TodoStore::new();

        let a = store.create(new_todo("a"));
        let b = store.create(new_todo("b"));
        let c = store.create(new_todo("c"));
        store.complete(a.id);
        store.complete(c.id);

        assert_eq!(store.delete_completed(), 2);

        let remaining = store.find_all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);

        // Nothing left to remove.
        assert_eq!(store.delete_completed(), 0);
    }
}
