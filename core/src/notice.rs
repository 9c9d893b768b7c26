//! Transient user notifications and navigation targets produced by the
//! view-models. Rendering them is up to the host.

use std::fmt;
use std::time::Duration;

use crate::types::TodoId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dismissible message shown for a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Label of the dismiss action, if any.
    pub action: Option<&'static str>,
    pub duration: Duration,
}

impl Notice {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            action: None,
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            action: Some("OK"),
            duration,
        }
    }
}

/// Where the host should navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TodoList,
    NewTodo,
    TodoDetail(TodoId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::TodoList => "/todos".to_string(),
            Route::NewTodo => "/todos/new".to_string(),
            Route::TodoDetail(id) => format!("/todos/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
