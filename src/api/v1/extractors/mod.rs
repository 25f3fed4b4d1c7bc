/*
 * Responsibility
 * - extractors の公開インターフェース (re-export)
 */
pub mod auth_ctx;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
