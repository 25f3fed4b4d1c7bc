/*
 * Responsibility
 * - v1 handlers の公開 (re-export)
 */
pub mod auth;
pub mod health;
pub mod todos;
