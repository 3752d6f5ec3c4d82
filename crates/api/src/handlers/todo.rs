//! Handlers for to-dos, their sub-tasks and comments.
//!
//! Every mutation appends its audit entries while still holding the write
//! guard, so the feed never shows a change the store does not have.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::audit::{TargetKind, TodoAction};
use groundwork_core::types::DbId;
use groundwork_db::models::todo::{
    AddComment, AddSubTask, CreateTodo, SetTodoDependency, Todo, TodoView, UpdateSubTask,
    UpdateTodo, UpdateTodoReminder,
};
use groundwork_db::repositories::{ProjectRepo, TodoRepo};
use groundwork_db::Store;
use serde::Deserialize;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateTodosRequest {
    pub goal: String,
}

fn record(store: &mut Store, actor_id: DbId, todo: &Todo, action: TodoAction, name: String) {
    audit::record(
        store,
        Some(todo.project_id),
        actor_id,
        action,
        audit::target(TargetKind::Todo, todo.id, name),
    );
}

// ---------------------------------------------------------------------------
// To-dos
// ---------------------------------------------------------------------------

/// POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateTodo>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let todo = TodoRepo::create(&mut store, &input, actor.user_id)?;
    record(&mut store, actor.user_id, &todo, TodoAction::Added, todo.text.clone());

    tracing::info!(todo_id = todo.id, project_id = todo.project_id, actor_id = actor.user_id, "To-do created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo.view() })))
}

/// GET /api/v1/todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = TodoRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse { data: todo.view() }))
}

/// PUT /api/v1/todos/{id}
///
/// One audit entry per field whose value actually changed.
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (todo, changes) = TodoRepo::update(&mut store, id, &input)?;
    let changed = changes.len();
    for (action, description) in changes {
        record(&mut store, actor.user_id, &todo, action, description);
    }

    tracing::info!(todo_id = id, changed, actor_id = actor.user_id, "To-do updated");
    Ok(Json(DataResponse { data: todo.view() }))
}

/// DELETE /api/v1/todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let removed = TodoRepo::delete(&mut store, id)?;
    let name = format!("\"{}\" deleted", removed.text);
    record(&mut store, actor.user_id, &removed, TodoAction::Completed, name);

    tracing::info!(todo_id = id, actor_id = actor.user_id, "To-do deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/todos/{id}/reminder
///
/// A `null` reminder clears it without an audit entry.
pub async fn set_reminder(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodoReminder>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let todo = TodoRepo::set_reminder(&mut store, id, input.reminder_at)?;
    if todo.reminder_at.is_some() {
        let name = format!("for \"{}\"", todo.text);
        record(&mut store, actor.user_id, &todo, TodoAction::ReminderSet, name);
    }
    Ok(Json(DataResponse { data: todo.view() }))
}

/// PUT /api/v1/todos/{id}/dependency
pub async fn set_dependency(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<SetTodoDependency>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (todo, action) = TodoRepo::set_dependency(&mut store, id, input.depends_on)?;
    if let Some(action) = action {
        let name = match todo.depends_on {
            Some(prerequisite) => format!("\"{}\" depends on #{prerequisite}", todo.text),
            None => format!("for \"{}\"", todo.text),
        };
        record(&mut store, actor.user_id, &todo, action, name);
    }
    Ok(Json(DataResponse { data: todo.view() }))
}

// ---------------------------------------------------------------------------
// Sub-tasks and comments
// ---------------------------------------------------------------------------

/// POST /api/v1/todos/{id}/subtasks
pub async fn add_subtask(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<AddSubTask>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (todo, sub_task) = TodoRepo::add_subtask(&mut store, id, &input.text)?;
    let name = format!("\"{}\" to \"{}\"", sub_task.text, todo.text);
    record(&mut store, actor.user_id, &todo, TodoAction::SubtaskAdded, name);
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo.view() })))
}

/// PUT /api/v1/todos/{id}/subtasks/{sub_task_id}
pub async fn update_subtask(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, sub_task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSubTask>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (todo, before, action) = TodoRepo::update_subtask(&mut store, id, sub_task_id, &input)?;
    if let Some(action) = action {
        let name = format!("\"{}\" in \"{}\"", before.text, todo.text);
        record(&mut store, actor.user_id, &todo, action, name);
    }
    Ok(Json(DataResponse { data: todo.view() }))
}

/// DELETE /api/v1/todos/{id}/subtasks/{sub_task_id}
pub async fn delete_subtask(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, sub_task_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (todo, removed) = TodoRepo::delete_subtask(&mut store, id, sub_task_id)?;
    let name = format!("\"{}\" from \"{}\"", removed.text, todo.text);
    record(&mut store, actor.user_id, &todo, TodoAction::SubtaskDeleted, name);
    Ok(Json(DataResponse { data: todo.view() }))
}

/// POST /api/v1/todos/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<AddComment>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let todo = TodoRepo::add_comment(&mut store, id, &input.text, actor.user_id)?;
    let name = format!("on \"{}\"", todo.text);
    record(&mut store, actor.user_id, &todo, TodoAction::CommentAdded, name);
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo.view() })))
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{project_id}/todos
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todos: Vec<TodoView> = TodoRepo::list_by_project(&*state.db.read().await, project_id)
        .into_iter()
        .map(Todo::view)
        .collect();
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/projects/{project_id}/todos/board
pub async fn board(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let board = TodoRepo::board(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: board }))
}

/// POST /api/v1/projects/{project_id}/todos/generate
///
/// Breaks a goal down into to-dos proposed by the assistant and creates
/// them all.
pub async fn generate(
    State(state): State<AppState>,
    actor: Actor,
    Path(project_id): Path<DbId>,
    Json(input): Json<GenerateTodosRequest>,
) -> AppResult<impl IntoResponse> {
    let goal = input.goal.trim();
    if goal.is_empty() {
        return Err(AppError::BadRequest("Goal must not be empty".into()));
    }
    ProjectRepo::require(&*state.db.read().await, project_id)?;

    let suggestions = state.assistant.generate_tasks(goal).await?;

    let mut store = state.db.write().await;
    let mut created = Vec::with_capacity(suggestions.len());
    for suggestion in suggestions {
        let input = CreateTodo {
            text: suggestion.text,
            project_id,
            priority: suggestion.priority,
            due_date: None,
            reminder_at: None,
            depends_on: None,
        };
        let todo = TodoRepo::create(&mut store, &input, actor.user_id)?;
        record(&mut store, actor.user_id, &todo, TodoAction::Added, todo.text.clone());
        created.push(todo.view());
    }

    tracing::info!(project_id, created = created.len(), actor_id = actor.user_id, "To-dos generated");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
