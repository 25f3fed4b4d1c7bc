/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserStore, todos: TodoStore, jwt: JwtService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{todo_repo::TodoStore, user_repo::UserStore};
use crate::services::auth::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub todos: Arc<TodoStore>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(users: Arc<UserStore>, todos: Arc<TodoStore>, jwt: Arc<JwtService>) -> Self {
        Self { users, todos, jwt }
    }
}
