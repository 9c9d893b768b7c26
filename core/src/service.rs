//! The todo access service: the only boundary between the client and the
//! remote todo store.
//!
//! # Design
//! `TodoService` is a capability trait so view-models can run against the
//! HTTP implementation or an independent in-memory one. `HttpTodoService`
//! composes the stateless `TodoClient` with a `Transport`, so every network
//! call is a build → execute → parse sequence. Errors are returned to the
//! caller unchanged; nothing is retried.

use std::future::Future;

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::filter;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{LocalFilters, ServerFilters, Todo, TodoId};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as data; only failures to
/// get a response at all are errors.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// List, fetch, create and locally filter todos.
pub trait TodoService {
    /// Fetch todos matching the server-side filters, exactly as returned.
    fn list_todos(
        &self,
        filters: &ServerFilters,
    ) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send;

    /// `Ok(None)` when the store has no todo with this id.
    fn get_todo_by_id(
        &self,
        id: &TodoId,
    ) -> impl Future<Output = Result<Option<Todo>, ApiError>> + Send;

    /// Persist a new todo and return the identifier the store assigned.
    fn add_todo(&self, todo: &Todo) -> impl Future<Output = Result<TodoId, ApiError>> + Send;

    /// Pure local filtering; never touches the store.
    fn filter_todos(&self, todos: &[Todo], filters: &LocalFilters) -> Vec<Todo> {
        filter::filter_todos(todos, filters)
    }
}

/// `TodoService` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport + Sync> HttpTodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub async fn delete_todo(&self, id: &TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id)?;
        let response = self.round_trip(request).await?;
        self.client.parse_delete_todo(response)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;
        debug!(method, %path, status = response.status, "todo api round-trip");
        Ok(response)
    }
}

impl<T: Transport + Sync> TodoService for HttpTodoService<T> {
    async fn list_todos(&self, filters: &ServerFilters) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos(filters);
        let response = self.round_trip(request).await?;
        self.client.parse_list_todos(response)
    }

    async fn get_todo_by_id(&self, id: &TodoId) -> Result<Option<Todo>, ApiError> {
        let request = self.client.build_get_todo(id)?;
        let response = self.round_trip(request).await?;
        self.client.parse_get_todo(response)
    }

    async fn add_todo(&self, todo: &Todo) -> Result<TodoId, ApiError> {
        let request = self.client.build_add_todo(todo)?;
        let response = self.round_trip(request).await?;
        self.client.parse_add_todo(response)
    }
}
