//! In-memory `TodoService` for tests and offline use.
//!
//! Applies the server-side filters itself (exact owner, exact status) and
//! records every call so tests can assert on what reached the store.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::ApiError;
use crate::service::TodoService;
use crate::types::{ServerFilters, Todo, TodoId};

/// A call that reached the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    List(ServerFilters),
    Get(TodoId),
    Add(Todo),
}

#[derive(Debug, Default)]
struct Store {
    todos: Vec<Todo>,
    calls: Vec<ServiceCall>,
    fail_with: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryTodoService {
    store: Mutex<Store>,
}

impl InMemoryTodoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Todos without an id get one assigned.
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos = todos
            .into_iter()
            .map(|todo| {
                if todo.is_persisted() {
                    todo
                } else {
                    assign_id(todo).1
                }
            })
            .collect();
        Self {
            store: Mutex::new(Store {
                todos,
                ..Store::default()
            }),
        }
    }

    /// Make every following call fail with a transport error until cleared.
    pub fn fail_with(&self, message: Option<&str>) {
        self.lock().fail_with = message.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panic while holding the lock only happens in a failing test; the
        // store itself is still consistent.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: ServiceCall) -> Result<MutexGuard<'_, Store>, ApiError> {
        let mut store = self.lock();
        store.calls.push(call);
        if let Some(message) = store.fail_with.clone() {
            return Err(ApiError::Transport(message));
        }
        Ok(store)
    }
}

fn assign_id(todo: Todo) -> (TodoId, Todo) {
    let simple = Uuid::new_v4().simple().to_string();
    let id = TodoId::new(&simple[..24]);
    let persisted = Todo::persisted(id.clone(), todo.owner, todo.status, todo.body, todo.category);
    (id, persisted)
}

impl TodoService for InMemoryTodoService {
    async fn list_todos(&self, filters: &ServerFilters) -> Result<Vec<Todo>, ApiError> {
        let store = self.record(ServiceCall::List(filters.clone()))?;
        let owner = filters.owner.as_deref().filter(|o| !o.is_empty());
        Ok(store
            .todos
            .iter()
            .filter(|t| owner.map_or(true, |o| t.owner == o))
            .filter(|t| filters.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect())
    }

    async fn get_todo_by_id(&self, id: &TodoId) -> Result<Option<Todo>, ApiError> {
        if id.as_str().is_empty() {
            return Err(ApiError::InvalidRequest("todo id must not be empty".to_string()));
        }
        let store = self.record(ServiceCall::Get(id.clone()))?;
        Ok(store.todos.iter().find(|t| t.id() == Some(id)).cloned())
    }

    async fn add_todo(&self, todo: &Todo) -> Result<TodoId, ApiError> {
        if let Some(id) = todo.id() {
            return Err(ApiError::InvalidRequest(format!(
                "todo {id} is already persisted"
            )));
        }
        let mut store = self.record(ServiceCall::Add(todo.clone()))?;
        let (id, persisted) = assign_id(todo.clone());
        store.todos.push(persisted);
        Ok(id)
    }
}
