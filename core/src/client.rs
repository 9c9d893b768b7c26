//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the todo collection URL and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (usually `HttpTodoService`) executes the
//! round-trip in between, keeping this layer deterministic and free of I/O.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatedTodo, ServerFilters, Todo, TodoId};

const JSON_HEADER: (&str, &str) = ("content-type", "application/json");

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    todo_url: String,
}

impl TodoClient {
    /// `base_url` is the API root, e.g. `http://localhost:4567/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            todo_url: format!("{}/todos", base_url.trim_end_matches('/')),
        }
    }

    /// URL of the todo collection.
    pub fn todo_url(&self) -> &str {
        &self.todo_url
    }

    pub fn build_list_todos(&self, filters: &ServerFilters) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.todo_url.clone(),
            query: filters.query_pairs(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_todo(&self, id: &TodoId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id)?,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        })
    }

    /// The todo must not carry an identifier yet.
    pub fn build_add_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        if let Some(id) = todo.id() {
            return Err(ApiError::InvalidRequest(format!(
                "todo {id} is already persisted"
            )));
        }
        let body =
            serde_json::to_string(todo).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.todo_url.clone(),
            query: Vec::new(),
            headers: vec![(JSON_HEADER.0.to_string(), JSON_HEADER.1.to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id)?,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_success(&response)?;
        decode(&response.body)
    }

    /// A 404 means "no such todo" and yields `None`.
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        match check_success(&response) {
            Ok(()) => decode(&response.body).map(Some),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<TodoId, ApiError> {
        check_success(&response)?;
        let created: CreatedTodo = decode(&response.body)?;
        Ok(created.id)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    fn item_url(&self, id: &TodoId) -> Result<String, ApiError> {
        if id.as_str().is_empty() {
            return Err(ApiError::InvalidRequest("todo id must not be empty".to_string()));
        }
        let mut url = url::Url::parse(&self.todo_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.todo_url.clone()))?
            .push(id.as_str());
        Ok(url.into())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
