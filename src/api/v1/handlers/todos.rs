/*
 * Responsibility
 * - /todos 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → repo 呼び出し
 * - complete は store の outcome を 200/404/409 に対応させる
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse},
};

use crate::{
    api::v1::dto::todos::{
        CountResponse, CreateTodoRequest, DeleteCompletedResponse, TodoResponse, UpdateTodoRequest,
    },
    error::AppError,
    repos::todo_repo::CompleteOutcome,
    state::AppState,
};

pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<TodoResponse>> {
    let todos = state
        .todos
        .find_all()
        .into_iter()
        .map(TodoResponse::from)
        .collect();

    Json(todos)
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state
        .todos
        .find_by_id(id)
        .ok_or(AppError::not_found("todo"))?;

    Ok(Json(TodoResponse::from(todo)))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let todo = state.todos.create(req.into_fields());
    let location = format!("/api/v1/todos/{}", todo.id);

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::LOCATION, location)]),
        Json(TodoResponse::from(todo)),
    ))
}

pub async fn create_todos_batch(
    State(state): State<AppState>,
    Json(reqs): Json<Vec<CreateTodoRequest>>,
) -> Result<(StatusCode, Json<Vec<TodoResponse>>), AppError> {
    if reqs.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_REQUEST",
            "Request body must contain at least one todo.",
        ));
    }
    for req in &reqs {
        req.validate()
            .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;
    }

    let created = state
        .todos
        .create_batch(reqs.into_iter().map(CreateTodoRequest::into_fields).collect())
        .into_iter()
        .map(TodoResponse::from)
        .collect();

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let todo = state
        .todos
        .update(id, req.into_fields())
        .ok_or(AppError::not_found("todo"))?;

    Ok(Json(TodoResponse::from(todo)))
}

pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    match state.todos.complete(id) {
        CompleteOutcome::Completed(todo) => Ok(Json(TodoResponse::from(todo))),
        CompleteOutcome::NotFound => Err(AppError::not_found("todo")),
        CompleteOutcome::AlreadyDone => Err(AppError::conflict(
            "ALREADY_COMPLETED",
            format!("Todo with id {id} is already completed."),
        )),
    }
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.todos.delete(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("todo"))
    }
}

pub async fn delete_completed_todos(
    State(state): State<AppState>,
) -> Json<DeleteCompletedResponse> {
    let deleted_count = state.todos.delete_completed();

    tracing::info!(deleted_count, "deleted completed todos");

    Json(DeleteCompletedResponse {
        deleted_count,
        message: format!("{deleted_count} completed todo(s) deleted."),
    })
}

pub async fn count_todos(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.todos.count(),
    })
}
