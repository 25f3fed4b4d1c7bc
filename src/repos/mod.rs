/*
 * Responsibility
 * - repo 層の公開インターフェース (re-export)
 */
pub mod error;
pub mod todo_repo;
pub mod user_repo;
