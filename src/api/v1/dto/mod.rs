/*
 * Responsibility
 * - v1 の request/response DTO の公開 (re-export)
 */
pub mod auth;
pub mod todos;
