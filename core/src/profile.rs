//! View-model behind the todo detail page.

use std::time::Duration;

use tracing::warn;

use crate::notice::Notice;
use crate::service::TodoService;
use crate::types::{Todo, TodoId};

const LOAD_FAILED_MESSAGE: &str = "Problem loading the todo – try again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Loading,
    Found(Todo),
    /// The store has no todo with this id.
    Missing,
    Failed,
}

#[derive(Debug, Clone)]
pub struct TodoProfileViewModel {
    id: TodoId,
    state: ProfileState,
}

impl TodoProfileViewModel {
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            state: ProfileState::Loading,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn todo(&self) -> Option<&Todo> {
        match &self.state {
            ProfileState::Found(todo) => Some(todo),
            _ => None,
        }
    }

    /// Fetch the todo. Returns a notice when the store could not be reached.
    pub async fn load<S: TodoService>(&mut self, service: &S) -> Option<Notice> {
        self.state = ProfileState::Loading;
        match service.get_todo_by_id(&self.id).await {
            Ok(Some(todo)) => {
                self.state = ProfileState::Found(todo);
                None
            }
            Ok(None) => {
                self.state = ProfileState::Missing;
                None
            }
            Err(err) => {
                warn!(id = %self.id, error = %err, "failed to load todo");
                self.state = ProfileState::Failed;
                Some(Notice::error(LOAD_FAILED_MESSAGE, Duration::from_secs(3)))
            }
        }
    }
}
