//! Core types for the roster: member records, the role vocabulary and name rules.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────

/// Shortest accepted name, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 40;

/// Roles used when the configuration does not name its own set.
pub const DEFAULT_ROLES: [&str; 4] = ["штурман", "водитель", "грузчик", "механик"];

/// Latin and Cyrillic letters, space, hyphen.
static NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-zА-Яа-яЁё -]+$").expect("name pattern is a valid regex")
});

// ─────────────────────────────────────────────────────────────────
// Member
// ─────────────────────────────────────────────────────────────────

/// One roster entry, serialized as `{"name": ..., "role": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub role: String,
}

impl Member {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    /// Key used for uniqueness and ordering.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.name, self.role)
    }
}

/// Case-folded form of a name as typed.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Canonical form of a role label.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

/// Check length and characters of an already trimmed name.
pub fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) || !NAME_CHARS.is_match(name) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            min: MIN_NAME_LEN,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Role Set
// ─────────────────────────────────────────────────────────────────

/// The closed vocabulary of role labels, held in canonical lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    roles: Vec<String>,
}

impl RoleSet {
    /// Build from configured labels. Labels are normalized; blanks and repeats are dropped.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles: Vec<String> = Vec::new();
        for label in labels {
            let role = normalize_role(label.as_ref());
            if !role.is_empty() && !roles.contains(&role) {
                roles.push(role);
            }
        }
        Self { roles }
    }

    /// Map user input onto its canonical label.
    pub fn resolve(&self, input: &str) -> Result<&str> {
        let wanted = normalize_role(input);
        self.roles
            .iter()
            .find(|r| **r == wanted)
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidRole {
                role: input.trim().to_string(),
                allowed: self.roles.clone(),
            })
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::new(DEFAULT_ROLES)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.roles.join(", "))
    }
}
