/*
 * Responsibility
 * - Todos の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::todo_repo::{NewTodo, Todo, TodoUpdate};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.title.len() > 200 {
            return Err("title must be <= 200 chars");
        }
        Ok(())
    }

    pub fn into_fields(self) -> NewTodo {
        NewTodo {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
        }
    }
}

/// Full-replacement payload: title/description/due_date always overwrite.
/// `done` is optional; when supplied it overwrites the flag in either
/// direction.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.title.len() > 200 {
            return Err("title must be <= 200 chars");
        }
        Ok(())
    }

    pub fn into_fields(self) -> TodoUpdate {
        TodoUpdate {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            done: self.done,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            due_date: todo.due_date,
            done: todo.done,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteCompletedResponse {
    pub deleted_count: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let ok = CreateTodoRequest {
            title: "write tests".into(),
            description: None,
            due_date: None,
        };
        assert!(ok.validate().is_ok());

        let blank = CreateTodoRequest {
            title: "   ".into(),
            description: None,
            due_date: None,
        };
        assert!(blank.validate().is_err());

        let too_long = CreateTodoRequest {
            title: "x".repeat(201),
            description: None,
            due_date: None,
        };
        assert!(too_long.validate().is_err());
    }
}
