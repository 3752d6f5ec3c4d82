use groundwork_core::todo::{completion_ratio, Comment, SubTask, TodoPriority, TodoStatus};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub text: String,
    pub status: TodoStatus,
    pub project_id: DbId,
    pub priority: TodoPriority,
    pub due_date: Option<Timestamp>,
    pub reminder_at: Option<Timestamp>,
    /// Advisory prerequisite; never blocks status changes.
    pub depends_on: Option<DbId>,
    pub sub_tasks: Vec<SubTask>,
    pub comments: Vec<Comment>,
    pub created_at: Timestamp,
    pub creator_id: DbId,
}

impl Todo {
    pub fn view(self) -> TodoView {
        TodoView {
            completion_ratio: completion_ratio(&self.sub_tasks),
            todo: self,
        }
    }
}

impl Record for Todo {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,
    pub completion_ratio: Option<f64>,
}

/// To-dos grouped into the three kanban columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KanbanBoard {
    pub todo: Vec<TodoView>,
    pub in_progress: Vec<TodoView>,
    pub done: Vec<TodoView>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub text: String,
    pub project_id: DbId,
    #[serde(default)]
    pub priority: TodoPriority,
    pub due_date: Option<Timestamp>,
    pub reminder_at: Option<Timestamp>,
    pub depends_on: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoReminder {
    pub reminder_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetTodoDependency {
    pub depends_on: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSubTask {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubTask {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddComment {
    pub text: String,
}
