/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /todos を合成
 * - Bearer は router 全体に掛け、認証必須の handler 側で AuthCtx を要求する
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, me, register},
    health::health,
    todos::{
        complete_todo, count_todos, create_todo, create_todos_batch, delete_completed_todos,
        delete_todo, get_todo, list_todos, update_todo,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/batch", post(create_todos_batch))
        .route("/todos/count", get(count_todos))
        .route("/todos/completed", delete(delete_completed_todos))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/complete", put(complete_todo))
}
