//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! The identifier is serialized as `_id` and omitted entirely while a todo has
//! not been persisted, so the same `Todo` value doubles as the create payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, server-assigned todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo record.
///
/// The identifier is read-only: a fetched todo keeps the id the server gave
/// it, and a todo built on the client has none until the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<TodoId>,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

impl Todo {
    /// A todo that has not been persisted yet.
    pub fn new(
        owner: impl Into<String>,
        status: bool,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            owner: owner.into(),
            status,
            body: body.into(),
            category: category.into(),
        }
    }

    /// A todo as the server returned it.
    pub fn persisted(
        id: impl Into<TodoId>,
        owner: impl Into<String>,
        status: bool,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(owner, status, body, category)
        }
    }

    pub fn id(&self) -> Option<&TodoId> {
        self.id.as_ref()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Label shown on todo cards.
    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Complete"
        } else {
            "Incomplete"
        }
    }
}

/// Filters forwarded to the server as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilters {
    pub owner: Option<String>,
    pub status: Option<bool>,
}

impl ServerFilters {
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Query pairs in a stable order. Absent and empty-owner filters are
    /// left out entirely.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(owner) = self.owner.as_deref().filter(|o| !o.is_empty()) {
            pairs.push(("owner".to_string(), owner.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        pairs
    }
}

/// Filters applied locally after a fetch. Never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFilters {
    pub body: Option<String>,
    pub category: Option<String>,
}

impl LocalFilters {
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Response payload of a successful create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedTodo {
    pub id: TodoId,
}
