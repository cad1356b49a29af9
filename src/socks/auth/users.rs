//! Static user table
//!
//! A username/password map loaded at startup and never mutated, so it can
//! back a [`CredentialChecker`] without any locking.

use crate::socks::context::CredentialChecker;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only username to password map
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: HashMap<String, String>,
}

impl UserTable {
    /// Create a table from username/password pairs
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Check a username/password pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// Number of users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the table has no users
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Wrap the table into a shareable credential checker
    pub fn into_checker(self) -> CredentialChecker {
        let table = Arc::new(self);
        Arc::new(move |username: &str, password: &str| table.verify(username, password))
    }
}

impl FromIterator<(String, String)> for UserTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
