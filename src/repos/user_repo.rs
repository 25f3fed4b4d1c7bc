/*
 * Responsibility
 * - users のインメモリ保存 (id map + username index)
 * - 登録・検索・パスワード照合を提供
 * - username の一意性は index への write lock 内で check-then-insert
 */
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use bcrypt::{hash, verify};
use parking_lot::RwLock;

use crate::repos::error::RepoError;

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    // bcrypt hash. Never expose through the API.
    pub password_hash: String,
    pub email: String,
}

/// In-memory credential store.
///
/// Users are created once at registration and never mutated or deleted, so
/// reads can hand out clones without aliasing concerns.
pub struct UserStore {
    users: RwLock<HashMap<i64, User>>,
    // username -> user id. Guarded separately; registration takes its write
    // lock for the whole check-then-insert sequence.
    username_index: RwLock<HashMap<String, i64>>,
    id_generator: AtomicI64,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            username_index: RwLock::new(HashMap::new()),
            id_generator: AtomicI64::new(1),
            bcrypt_cost,
        }
    }

    /// Register a new user.
    ///
    /// The uniqueness check and the index insertion happen under one write
    /// lock on the username index, so two concurrent registrations with the
    /// same username cannot both succeed. Ids allocated for a losing attempt
    /// are not reused.
    pub fn register(
        &self,
        username: &str,
        raw_password: &str,
        email: &str,
    ) -> Result<User, RepoError> {
        let password_hash = hash(raw_password, self.bcrypt_cost)?;

        let mut index = self.username_index.write();
        if index.contains_key(username) {
            return Err(RepoError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let id = self.id_generator.fetch_add(1, Ordering::Relaxed);
        let user = User {
            id,
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
        };

        index.insert(user.username.clone(), id);
        self.users.write().insert(id, user.clone());

        Ok(user)
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let id = *self.username_index.read().get(username)?;
        self.users.read().get(&id).cloned()
    }

    pub fn find_by_id(&self, id: i64) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    pub fn exists_by_username(&self, username: &str) -> bool {
        self.username_index.read().contains_key(username)
    }

    /// Check a raw password against the stored hash.
    ///
    /// An unparsable hash counts as non-match rather than an error; login
    /// treats it the same as a wrong password.
    pub fn verify_password(&self, user: &User, raw_password: &str) -> bool {
        verify(raw_password, &user.password_hash).unwrap_or(false)
    }
}
