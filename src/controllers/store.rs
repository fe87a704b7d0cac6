use crate::model::User;
use chrono::Utc;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Writable user fields as sent by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    users: BTreeMap<u64, User>,
}

/// In-memory user table shared by all request coroutines.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    state: Arc<Mutex<StoreState>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // a panicked writer cannot leave a half-inserted user behind
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All users ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.lock().users.values().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    /// Insert a new user and assign the next id.
    pub fn create(&self, input: UserInput) -> User {
        let mut state = self.lock();
        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_id,
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        user
    }

    /// Apply the non-empty fields of `input` to an existing user.
    pub fn update(&self, id: u64, input: UserInput) -> Option<User> {
        let mut state = self.lock();
        let user = state.users.get_mut(&id)?;
        if !input.name.is_empty() {
            user.name = input.name;
        }
        if !input.email.is_empty() {
            user.email = input.email;
        }
        user.updated_at = Utc::now();
        Some(user.clone())
    }

    /// Remove a user; returns whether it existed.
    pub fn delete(&self, id: u64) -> bool {
        self.lock().users.remove(&id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
