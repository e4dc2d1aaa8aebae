// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use taskledger_model::{User, UserId, UserPatch};

/// Purely in-memory user rows, insertion-ordered, no persistence. Same row
/// semantics as the task table minus the file mirror.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    rows: Vec<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    UserMissing(UserId),
    Conflict(UserId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserMissing(id) => write!(f, "user {id} not found"),
            Self::Conflict(id) => write!(f, "user {id} already exists"),
        }
    }
}

impl std::error::Error for RegistryError {}

impl UserRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: Vec<User>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[User] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.position(id).map(|index| &self.rows[index])
    }

    pub fn create(&mut self, user: User) -> Result<User, RegistryError> {
        if self.position(user.id).is_some() {
            return Err(RegistryError::Conflict(user.id));
        }
        self.rows.push(user.clone());
        Ok(user)
    }

    pub fn replace(&mut self, id: UserId, user: User) -> Result<User, RegistryError> {
        let index = self.position(id).ok_or(RegistryError::UserMissing(id))?;
        self.rows[index] = user.clone();
        Ok(user)
    }

    pub fn patch(&mut self, id: UserId, patch: &UserPatch) -> Result<User, RegistryError> {
        let index = self.position(id).ok_or(RegistryError::UserMissing(id))?;
        self.rows[index].apply_patch(patch);
        Ok(self.rows[index].clone())
    }

    pub fn delete(&mut self, id: UserId) -> Result<User, RegistryError> {
        let index = self.position(id).ok_or(RegistryError::UserMissing(id))?;
        Ok(self.rows.remove(index))
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.rows.iter().position(|user| user.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, age: u32) -> User {
        User {
            id: UserId::new(id),
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let mut registry = UserRegistry::new();
        registry.create(user(1, "Alice", 30)).expect("first insert");
        let err = registry.create(user(1, "Bob", 25)).expect_err("duplicate");
        assert_eq!(err, RegistryError::Conflict(UserId::new(1)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(UserId::new(1)).map(|u| u.name.as_str()), Some("Alice"));
    }

    #[test]
    fn patch_and_delete_fail_on_missing_id() {
        let mut registry = UserRegistry::from_rows(vec![user(1, "Alice", 30)]);
        let missing = UserId::new(9);
        assert_eq!(
            registry.patch(missing, &UserPatch::default()).expect_err("patch miss"),
            RegistryError::UserMissing(missing)
        );
        assert_eq!(
            registry.delete(missing).expect_err("delete miss"),
            RegistryError::UserMissing(missing)
        );
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut registry = UserRegistry::new();
        for id in [3, 1, 2] {
            registry.create(user(id, "x", 20)).expect("insert");
        }
        let ids: Vec<u64> = registry.as_slice().iter().map(|u| u.id.value()).collect();
        assert_eq!(ids, [3, 1, 2]);
    }
}
