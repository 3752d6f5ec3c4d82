//! To-dos with sub-tasks, comments and advisory dependencies.
//!
//! Mutations return the audit entries they imply so the caller can record
//! them under the same write guard.

use chrono::Utc;
use groundwork_core::audit::TodoAction;
use groundwork_core::error::CoreError;
use groundwork_core::todo::{
    changed_fields, dependency_change, subtask_update_action, validate_text, AuditedChanges,
    AuditedFields, Comment, SubTask, TodoStatus,
};
use groundwork_core::types::{DbId, Timestamp};

use crate::models::todo::{CreateTodo, KanbanBoard, Todo, UpdateSubTask, UpdateTodo};
use crate::Store;

const ENTITY: &str = "Todo";
const SUBTASK: &str = "SubTask";

pub struct TodoRepo;

impl TodoRepo {
    /// Create a to-do in the `Todo` column.
    pub fn create(store: &mut Store, input: &CreateTodo, creator_id: DbId) -> Result<Todo, CoreError> {
        validate_text(&input.text)?;
        store.projects.require("Project", input.project_id)?;
        if let Some(prerequisite) = input.depends_on {
            store.todos.require(ENTITY, prerequisite)?;
        }
        let todo = Todo {
            id: store.todos.allocate_id(),
            text: input.text.trim().to_string(),
            status: TodoStatus::Todo,
            project_id: input.project_id,
            priority: input.priority,
            due_date: input.due_date,
            reminder_at: input.reminder_at,
            depends_on: input.depends_on,
            sub_tasks: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
            creator_id,
        };
        store.todos.push_back(todo.clone());
        Ok(todo)
    }

    pub fn find_by_id(store: &Store, id: DbId) -> Option<Todo> {
        store.todos.get(id).cloned()
    }

    pub fn require(store: &Store, id: DbId) -> Result<Todo, CoreError> {
        store.todos.require(ENTITY, id).cloned()
    }

    /// Apply an update. Only fields whose value actually changes produce
    /// audit entries; status moves are unrestricted.
    pub fn update(
        store: &mut Store,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<(Todo, Vec<(TodoAction, String)>), CoreError> {
        if let Some(text) = &input.text {
            validate_text(text)?;
        }
        let todo = store.todos.require_mut(ENTITY, id)?;
        let entries = changed_fields(
            AuditedFields {
                text: &todo.text,
                status: todo.status,
                priority: todo.priority,
                due_date: todo.due_date,
            },
            AuditedChanges {
                text: input.text.as_deref().map(str::trim),
                status: input.status,
                priority: input.priority,
                due_date: input.due_date,
            },
        );
        if let Some(text) = &input.text {
            todo.text = text.trim().to_string();
        }
        if let Some(status) = input.status {
            todo.status = status;
        }
        if let Some(priority) = input.priority {
            todo.priority = priority;
        }
        if let Some(due) = input.due_date {
            todo.due_date = Some(due);
        }
        Ok((todo.clone(), entries))
    }

    pub fn set_reminder(
        store: &mut Store,
        id: DbId,
        reminder_at: Option<Timestamp>,
    ) -> Result<Todo, CoreError> {
        let todo = store.todos.require_mut(ENTITY, id)?;
        todo.reminder_at = reminder_at;
        Ok(todo.clone())
    }

    /// Set or clear the prerequisite.
    pub fn set_dependency(
        store: &mut Store,
        id: DbId,
        depends_on: Option<DbId>,
    ) -> Result<(Todo, Option<TodoAction>), CoreError> {
        if let Some(prerequisite) = depends_on {
            store.todos.require(ENTITY, prerequisite)?;
        }
        let todo = store.todos.require_mut(ENTITY, id)?;
        let action = dependency_change(id, todo.depends_on, depends_on)?;
        todo.depends_on = depends_on;
        Ok((todo.clone(), action))
    }

    /// Delete a to-do. Dependents lose their (now dangling) prerequisite.
    pub fn delete(store: &mut Store, id: DbId) -> Result<Todo, CoreError> {
        let removed = store
            .todos
            .remove(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
        let dependents: Vec<DbId> = store
            .todos
            .iter()
            .filter(|t| t.depends_on == Some(id))
            .map(|t| t.id)
            .collect();
        for dependent in dependents {
            if let Some(todo) = store.todos.get_mut(dependent) {
                todo.depends_on = None;
            }
        }
        Ok(removed)
    }

    pub fn add_subtask(store: &mut Store, id: DbId, text: &str) -> Result<(Todo, SubTask), CoreError> {
        validate_text(text)?;
        store.todos.require(ENTITY, id)?;
        let sub_task = SubTask {
            id: store.next_child_id(),
            text: text.trim().to_string(),
            completed: false,
        };
        let todo = store.todos.require_mut(ENTITY, id)?;
        todo.sub_tasks.push(sub_task.clone());
        Ok((todo.clone(), sub_task))
    }

    /// Update a sub-task. Returns the sub-task as it was before the update
    /// and the audit action, if anything changed.
    pub fn update_subtask(
        store: &mut Store,
        id: DbId,
        sub_task_id: DbId,
        input: &UpdateSubTask,
    ) -> Result<(Todo, SubTask, Option<TodoAction>), CoreError> {
        if let Some(text) = &input.text {
            validate_text(text)?;
        }
        let todo = store.todos.require_mut(ENTITY, id)?;
        let sub_task = todo
            .sub_tasks
            .iter_mut()
            .find(|s| s.id == sub_task_id)
            .ok_or_else(|| CoreError::not_found(SUBTASK, sub_task_id))?;
        let before = sub_task.clone();
        let action = subtask_update_action(&before, input.text.as_deref(), input.completed);
        if let Some(text) = &input.text {
            sub_task.text = text.trim().to_string();
        }
        if let Some(completed) = input.completed {
            sub_task.completed = completed;
        }
        Ok((todo.clone(), before, action))
    }

    pub fn delete_subtask(
        store: &mut Store,
        id: DbId,
        sub_task_id: DbId,
    ) -> Result<(Todo, SubTask), CoreError> {
        let todo = store.todos.require_mut(ENTITY, id)?;
        let index = todo
            .sub_tasks
            .iter()
            .position(|s| s.id == sub_task_id)
            .ok_or_else(|| CoreError::not_found(SUBTASK, sub_task_id))?;
        let removed = todo.sub_tasks.remove(index);
        Ok((todo.clone(), removed))
    }

    pub fn add_comment(
        store: &mut Store,
        id: DbId,
        text: &str,
        creator_id: DbId,
    ) -> Result<Todo, CoreError> {
        validate_text(text)?;
        store.todos.require(ENTITY, id)?;
        let comment = Comment {
            id: store.next_child_id(),
            text: text.trim().to_string(),
            creator_id,
            created_at: Utc::now(),
        };
        let todo = store.todos.require_mut(ENTITY, id)?;
        todo.comments.push(comment);
        Ok(todo.clone())
    }

    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<Todo> {
        store
            .todos
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect()
    }

    /// Project to-dos grouped by status column.
    pub fn board(store: &Store, project_id: DbId) -> KanbanBoard {
        let mut board = KanbanBoard::default();
        for todo in Self::list_by_project(store, project_id) {
            let column = match todo.status {
                TodoStatus::Todo => &mut board.todo,
                TodoStatus::InProgress => &mut board.in_progress,
                TodoStatus::Done => &mut board.done,
            };
            column.push(todo.view());
        }
        board
    }
}
