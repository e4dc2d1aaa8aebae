// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ParseError;

/// Integer user key for the in-memory registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("user id"));
        }
        input
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::NotNumeric("user id"))
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_present_fields_only() {
        let mut user = User {
            id: UserId::new(1),
            name: "Alice".to_string(),
            age: 30,
        };
        user.apply_patch(&UserPatch {
            age: Some(31),
            ..UserPatch::default()
        });
        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, 31);
    }
}
