/*
 * Responsibility
 * - api バージョンの公開 (v1)
 */
pub mod v1;
