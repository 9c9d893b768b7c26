//! Client core for the todo service.
//!
//! # Overview
//! Everything a todo front end needs short of rendering: the access service
//! wrapping the REST API, client-side filtering, the list and detail
//! view-models, and the add-todo form with its validation rules.
//!
//! # Design
//! - `TodoClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `TodoService` is the capability the view-models depend on.
//!   `HttpTodoService` runs `TodoClient` over a `Transport`;
//!   `InMemoryTodoService` is a standalone implementation for tests.
//! - View-models never await inside their state transitions. The list
//!   view-model hands out sequence-numbered `FetchTicket`s and drops any
//!   completion that is not the latest.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod list;
pub mod memory;
pub mod notice;
pub mod profile;
pub mod service;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use filter::filter_todos;
pub use form::{AddTodoForm, Field, FieldError, FieldState, FormChange, Rule, SubmitOutcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{FetchOutcome, FetchTicket, TodoListViewModel, ViewType};
pub use memory::{InMemoryTodoService, ServiceCall};
pub use notice::{Notice, NoticeKind, Route};
pub use profile::{ProfileState, TodoProfileViewModel};
pub use service::{HttpTodoService, TodoService, Transport};
pub use transport::ReqwestTransport;
pub use types::{CreatedTodo, LocalFilters, ServerFilters, Todo, TodoId};
