/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("username '{username}' already taken")]
    DuplicateUsername { username: String },
    #[error("password hash error")]
    Hash(#[from] bcrypt::BcryptError),
}
