//! Roster store: owns the in-memory member list and its backing JSON file.
//!
//! Every successful mutation is written through to disk before returning, so
//! the file always mirrors the last successful in-memory state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::types::{name_key, normalize_role, validate_name, Member, RoleSet};

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "members.json";

/// Owns the roster and keeps the backing file consistent with it.
pub struct Store {
    /// Backing JSON file.
    path: PathBuf,

    /// Allowed role labels.
    roles: RoleSet,

    /// Members in insertion order.
    members: Vec<Member>,
}

impl Store {
    /// Create an empty store. Nothing is read until [`Store::load`].
    pub fn new(path: impl Into<PathBuf>, roles: RoleSet) -> Self {
        Self {
            path: path.into(),
            roles,
            members: Vec::new(),
        }
    }

    /// Create a store and load it, keeping an empty roster if the file is unreadable.
    ///
    /// The load error, if any, is handed back so the caller can report it.
    pub fn open(path: impl Into<PathBuf>, roles: RoleSet) -> (Self, Option<Error>) {
        let mut store = Self::new(path, roles);
        let err = store.load().err();
        (store, err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    // ─────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────

    /// Replace the in-memory roster with the backing file's contents.
    ///
    /// A missing file yields an empty roster. On any read or parse failure the
    /// roster is left empty and the error is returned.
    pub fn load(&mut self) -> Result<usize> {
        self.members.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "Data file absent, starting with empty roster");
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to read data file");
            Error::StorageRead {
                path: self.path.clone(),
                source: e,
            }
        })?;

        let members: Vec<Member> = serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Data file is not a member list");
            Error::StorageParse {
                path: self.path.clone(),
                source: e,
            }
        })?;

        self.members = members;
        info!(
            path = %self.path.display(),
            count = self.members.len(),
            "Roster loaded"
        );
        Ok(self.members.len())
    }

    /// Write the whole roster to the backing file, including an empty one.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.members)
            .map_err(|e| Error::Internal(format!("Failed to serialize roster: {}", e)))?;

        write_atomic(&self.path, json.as_bytes()).map_err(|e| Error::StorageWrite {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), count = self.members.len(), "Roster saved");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────

    /// Validate and append a member, then persist.
    ///
    /// Checks run in order: role, name format, uniqueness. The stored role is
    /// the canonical label; the stored name keeps its case.
    pub fn add(&mut self, name: &str, role: &str) -> Result<Member> {
        let name = name.trim();
        let role = self.roles.resolve(role)?.to_string();
        validate_name(name)?;

        let key = name_key(name);
        if self.members.iter().any(|m| m.name_key() == key) {
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }

        let member = Member::new(name, role);
        self.members.push(member.clone());

        if let Err(e) = self.save() {
            self.members.pop();
            return Err(e);
        }

        info!(name = %member.name, role = %member.role, "Member added");
        Ok(member)
    }

    /// All members, ascending by case-folded name. Ties keep insertion order.
    pub fn list_all(&self) -> Vec<&Member> {
        sorted(self.members.iter())
    }

    /// Members holding `role` (compared case-insensitively), sorted like [`Store::list_all`].
    pub fn list_by_role(&self, role: &str) -> Vec<&Member> {
        let wanted = normalize_role(role);
        sorted(
            self.members
                .iter()
                .filter(|m| normalize_role(&m.role) == wanted),
        )
    }

    /// Delete the member whose name matches case-insensitively, then persist.
    pub fn remove(&mut self, name: &str) -> Result<Member> {
        let name = name.trim();
        let key = name_key(name);

        let idx = self
            .members
            .iter()
            .position(|m| m.name_key() == key)
            .ok_or_else(|| Error::member_not_found(name))?;

        let removed = self.members.remove(idx);

        if let Err(e) = self.save() {
            self.members.insert(idx, removed);
            return Err(e);
        }

        info!(name = %removed.name, remaining = self.members.len(), "Member removed");
        Ok(removed)
    }

    /// Exact number of members held.
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

fn sorted<'a>(members: impl Iterator<Item = &'a Member>) -> Vec<&'a Member> {
    let mut items: Vec<&Member> = members.collect();
    items.sort_by_cached_key(|m| m.name_key());
    items
}

/// Write to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
