use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use domain::{find_mut, remove_by_id, Todo, TodoFilter, TodoId, TodoPatch};
use tracing::{info, warn};

use crate::error::{ApiError, StorageContext};
use crate::models::{CreateTodoRequest, HealthBody, ListParams, MessageResponse};
use crate::AppState;

const FETCH_FAILED: &str = "Failed to fetch todos";
const FETCH_ONE_FAILED: &str = "Failed to fetch todo";
const CREATE_FAILED: &str = "Failed to create todo";
const UPDATE_FAILED: &str = "Failed to update todo";
const DELETE_FAILED: &str = "Failed to delete todo";

/// GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let filter = match params.filter.as_deref() {
        Some(raw) => raw.parse::<TodoFilter>()?,
        None => TodoFilter::All,
    };

    let _guard = state.collection_lock.read().await;
    let todos = state.store.load().await.context(FETCH_FAILED)?;
    Ok(Json(filter.apply(todos)))
}

/// GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    let _guard = state.collection_lock.read().await;
    let todos = state.store.load().await.context(FETCH_ONE_FAILED)?;
    todos
        .into_iter()
        .find(|todo| todo.id == id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(req) = payload?;
    let todo = Todo::create(req.text.as_deref())?;

    let _guard = state.collection_lock.write().await;
    let mut todos = state.store.load().await.context(CREATE_FAILED)?;
    todos.push(todo.clone());
    state.store.save(&todos).await.context(CREATE_FAILED)?;

    info!(todo_id = %todo.id, count = todos.len(), "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/:id
///
/// 指定されたフィールドだけを更新する。作成時と異なりテキストの空チェックはしない。
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    let Json(patch) = payload?;

    let _guard = state.collection_lock.write().await;
    let mut todos = state.store.load().await.context(UPDATE_FAILED)?;
    let todo = find_mut(&mut todos, &id)?;

    if patch.is_empty() {
        info!(todo_id = %id, "Update request without fields");
    }
    if patch.sets_blank_text() {
        warn!(todo_id = %id, "Todo text updated to blank");
    }
    todo.apply(patch);
    let updated = todo.clone();

    state.store.save(&todos).await.context(UPDATE_FAILED)?;

    info!(todo_id = %id, completed = updated.completed, "Todo updated");
    Ok(Json(updated))
}

/// DELETE /api/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let _guard = state.collection_lock.write().await;
    let mut todos = state.store.load().await.context(DELETE_FAILED)?;
    remove_by_id(&mut todos, &id).ok_or(ApiError::NotFound)?;
    state.store.save(&todos).await.context(DELETE_FAILED)?;

    info!(todo_id = %id, count = todos.len(), "Todo deleted");
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        storage: state.store.kind(),
    })
}
