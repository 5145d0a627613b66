//! Identity tag and operation outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::permission::Permission;

/// Opaque label attached to every [`Acl`](crate::Acl).
///
/// Internally represented as a UUID v4. Only uniqueness matters; no
/// store behavior depends on the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclId(Uuid);

impl AclId {
    /// Creates a new random ACL ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_acl::AclId;
    ///
    /// let id = AclId::new();
    /// assert_ne!(id, AclId::new());
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ACL ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AclId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for AclId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for AclId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Result of [`Acl::remove`](crate::Acl::remove).
///
/// Both lists keep the caller's order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Permissions removed by this call.
    pub removed: Vec<Permission>,
    /// Permissions that were not held.
    pub not_removed: Vec<Permission>,
}

/// Result of [`Acl::check`](crate::Acl::check).
///
/// Both lists keep the caller's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Requested permissions the scope holds.
    pub was_set: Vec<Permission>,
    /// Requested permissions the scope does not hold.
    pub not_set: Vec<Permission>,
}

impl CheckOutcome {
    /// Returns `true` if every requested permission is held.
    pub fn all_set(&self) -> bool {
        self.not_set.is_empty()
    }
}
