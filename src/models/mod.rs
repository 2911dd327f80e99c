use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub(crate) type TodoId = u64;
pub(crate) type UserId = u64;

/// Identifier carried by the not-yet-confirmed ghost row.
pub(crate) const GHOST_ID: TodoId = 0;

/// A todo record as the backend stores it.
///
/// Wire keys follow the students-api contract: `id`, `userId`, `title`, `completed`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// Local placeholder shown while a create request is in flight.
    pub fn ghost(user_id: UserId, title: &str) -> Self {
        Self {
            id: GHOST_ID,
            user_id,
            title: title.to_string(),
            completed: false,
        }
    }
}

/// Create payload (`POST /todos`); the server assigns the id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewTodo {
    pub title: String,
    pub user_id: UserId,
    pub completed: bool,
}

impl From<&Todo> for NewTodo {
    fn from(t: &Todo) -> Self {
        Self {
            title: t.title.clone(),
            user_id: t.user_id,
            completed: t.completed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter)]
pub(crate) enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Filter::All => "/",
            Filter::Active => "/active",
            Filter::Completed => "/completed",
        }
    }

    /// Route path -> filter. Unknown paths fall back to `All`.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/active" => Filter::Active,
            "/completed" => Filter::Completed,
            _ => Filter::All,
        }
    }
}

/// User-facing banner texts. Exactly one may be shown at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub(crate) enum ErrorMessage {
    #[strum(to_string = "Unable to load todos")]
    UnableToLoadTodos,
    #[strum(to_string = "Title should not be empty")]
    TitleShouldNotBeEmpty,
    #[strum(to_string = "Unable to add a todo")]
    UnableToAddTodo,
    #[strum(to_string = "Unable to delete a todo")]
    UnableToDeleteTodo,
    #[strum(to_string = "Unable to update a todo")]
    UnableToUpdateTodo,
}
