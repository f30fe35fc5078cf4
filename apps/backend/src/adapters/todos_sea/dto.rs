//! DTOs for todos_sea adapter.

use crate::entities::todos::TodoState;

/// DTO for inserting a todo owned by `user_id`.
#[derive(Debug, Clone)]
pub struct TodoCreate {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub state: TodoState,
}

impl TodoCreate {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            state: TodoState::default(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_state(mut self, state: TodoState) -> Self {
        self.state = state;
        self
    }
}

/// Partial update. `description: Some(None)` clears the column.
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub state: Option<TodoState>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state.is_none()
    }
}
