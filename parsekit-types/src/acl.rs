//! Access control lists.
//!
//! An ACL maps principals to read/write grants. Principals are the public
//! wildcard `*`, user object ids, and roles written as `role:<name>`.

use crate::wire::{ToWire, WireValue};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::collections::BTreeMap;

/// Principal key granting access to everyone.
pub const PUBLIC_KEY: &str = "*";

/// Prefix distinguishing role principals from user ids.
pub const ROLE_PREFIX: &str = "role:";

/// Grants held by a single principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub write: bool,
}

impl Permissions {
    fn is_empty(&self) -> bool {
        !self.read && !self.write
    }
}

/// Read/write permissions keyed by principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acl {
    permissions: BTreeMap<String, Permissions>,
}

impl Acl {
    /// Creates an empty ACL (no one has access).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ACL granting read and write to a single user.
    #[must_use]
    pub fn for_user(user_id: &str) -> Self {
        let mut acl = Self::new();
        acl.set_read_access(user_id, true);
        acl.set_write_access(user_id, true);
        acl
    }

    /// Returns the principals that hold at least one grant.
    pub fn principals(&self) -> impl Iterator<Item = &str> {
        self.permissions.keys().map(String::as_str)
    }

    pub fn get_read_access(&self, principal: &str) -> bool {
        self.permissions.get(principal).is_some_and(|p| p.read)
    }

    pub fn get_write_access(&self, principal: &str) -> bool {
        self.permissions.get(principal).is_some_and(|p| p.write)
    }

    pub fn set_read_access(&mut self, principal: &str, allowed: bool) {
        self.update(principal, |p| p.read = allowed);
    }

    pub fn set_write_access(&mut self, principal: &str, allowed: bool) {
        self.update(principal, |p| p.write = allowed);
    }

    pub fn get_public_read_access(&self) -> bool {
        self.get_read_access(PUBLIC_KEY)
    }

    pub fn get_public_write_access(&self) -> bool {
        self.get_write_access(PUBLIC_KEY)
    }

    pub fn set_public_read_access(&mut self, allowed: bool) {
        self.set_read_access(PUBLIC_KEY, allowed);
    }

    pub fn set_public_write_access(&mut self, allowed: bool) {
        self.set_write_access(PUBLIC_KEY, allowed);
    }

    pub fn get_role_read_access(&self, role: &str) -> bool {
        self.get_read_access(&role_key(role))
    }

    pub fn get_role_write_access(&self, role: &str) -> bool {
        self.get_write_access(&role_key(role))
    }

    pub fn set_role_read_access(&mut self, role: &str, allowed: bool) {
        self.set_read_access(&role_key(role), allowed);
    }

    pub fn set_role_write_access(&mut self, role: &str, allowed: bool) {
        self.set_write_access(&role_key(role), allowed);
    }

    /// Applies `edit` to a principal's grants, dropping the entry once empty.
    fn update(&mut self, principal: &str, edit: impl FnOnce(&mut Permissions)) {
        let mut perms = self
            .permissions
            .get(principal)
            .copied()
            .unwrap_or_default();
        edit(&mut perms);
        if perms.is_empty() {
            self.permissions.remove(principal);
        } else {
            self.permissions.insert(principal.to_string(), perms);
        }
    }
}

fn role_key(role: &str) -> String {
    format!("{ROLE_PREFIX}{role}")
}

impl ToWire for Acl {
    fn to_wire(&self) -> WireValue {
        let mut out = Map::with_capacity(self.permissions.len());
        for (principal, perms) in &self.permissions {
            let mut grants = Map::new();
            if perms.read {
                grants.insert("read".to_string(), WireValue::Bool(true));
            }
            if perms.write {
                grants.insert("write".to_string(), WireValue::Bool(true));
            }
            out.insert(principal.clone(), WireValue::Object(grants));
        }
        WireValue::Object(out)
    }
}
