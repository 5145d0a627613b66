//! Bit-field permissions and their textual form.
//!
//! A [`Permission`] is a set of capabilities packed into a `u64`. Every
//! named capability owns exactly one bit, except `none`, which is the
//! empty set. Textually, a permission is a `|`-separated list of names:
//!
//! ```rust
//! use scope_acl::Permission;
//!
//! let p = Permission::parse_lenient("write | read").into_result().unwrap();
//! assert_eq!(p, Permission::READ | Permission::WRITE);
//! assert_eq!(p.to_string(), "read|write");
//! assert_eq!(Permission::NONE.to_string(), "none");
//! ```
//!
//! [`Permissioner`] bundles set/unset/was-set for a single capability.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use bitflags::bitflags;

use crate::error::{Error, ParseErrors, Parsed, Result};

/// Separator between permission names in a list.
pub const SEPARATOR: &str = "|";

/// Placeholder rendered for bits that have no name.
pub const UNKNOWN: &str = "unknown";

const NONE_NAME: &str = "none";

bitflags! {
    /// A combinable set of capabilities.
    ///
    /// Bit 0 carries no capability; it renders as [`UNKNOWN`] if set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Permission: u64 {
        /// Enumerate entries.
        const LIST = 1 << 1;
        /// Read contents.
        const READ = 1 << 2;
        /// Modify contents.
        const WRITE = 1 << 3;
        /// Run or invoke.
        const EXECUTE = 1 << 4;
        /// Remove entries.
        const DELETE = 1 << 5;
    }
}

const NAMES: [(Permission, &str); 6] = [
    (Permission::NONE, NONE_NAME),
    (Permission::LIST, "list"),
    (Permission::READ, "read"),
    (Permission::WRITE, "write"),
    (Permission::EXECUTE, "execute"),
    (Permission::DELETE, "delete"),
];

// Both tables are built once and never written afterwards.
static BY_NAME: LazyLock<HashMap<&'static str, Permission>> =
    LazyLock::new(|| NAMES.iter().map(|&(p, name)| (name, p)).collect());

static BY_UNIT: LazyLock<HashMap<Permission, &'static str>> =
    LazyLock::new(|| NAMES.iter().copied().collect());

impl Permission {
    /// The empty permission set.
    pub const NONE: Self = Self::empty();

    /// Every named capability with its textual name, `none` first.
    pub fn named() -> impl Iterator<Item = (Permission, &'static str)> {
        NAMES.iter().copied()
    }

    /// Resolves a single, already-trimmed name.
    pub fn lookup(name: &str) -> Option<Permission> {
        BY_NAME.get(name).copied()
    }

    /// Parses a `|`-separated list of names, skipping blanks.
    ///
    /// Unknown names are recorded as [`Error::InvalidPermission`] and the
    /// remaining names still resolve. The value is the union of every name
    /// that resolved, so a list made only of unknown names yields
    /// [`Permission::NONE`] along with the failures.
    pub fn parse_lenient(text: &str) -> Parsed<Permission> {
        let mut permission = Permission::NONE;
        let mut errors = ParseErrors::new();

        for token in text.split(SEPARATOR).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            match Permission::lookup(token) {
                Some(unit) => permission |= unit,
                None => errors.push(Error::InvalidPermission(token.to_string())),
            }
        }

        Parsed::new(permission, errors)
    }

    /// Returns `true` if at most one bit is set.
    pub const fn is_cleared_or_lone(self) -> bool {
        self.bits() == 0 || self.bits().is_power_of_two()
    }

    /// Splits into single-bit permissions, lowest bit first.
    pub fn units(self) -> impl Iterator<Item = Permission> {
        let bits = self.bits();
        (0..u64::BITS)
            .map(|shift| 1u64 << shift)
            .filter(move |bit| bits & bit != 0)
            .map(Permission::from_bits_retain)
    }

    fn unit_name(self) -> &'static str {
        BY_UNIT.get(&self).copied().unwrap_or(UNKNOWN)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(NONE_NAME);
        }
        for (i, unit) in self.units().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            f.write_str(unit.unit_name())?;
        }
        Ok(())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Permission::parse_lenient(s).into_result()
    }
}

// ============================================================================
// Permissioner
// ============================================================================

/// Set, clear, and test one capability bit.
///
/// # Panics
///
/// [`Permissioner::new`] panics when given a value with more than one bit
/// set. Composite values are a programming error here, not bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissioner {
    unit: Permission,
}

impl Permissioner {
    /// Toggler for the empty permission; `was_set` is always false.
    pub const NONE: Self = Self::new(Permission::NONE);
    /// Toggler for [`Permission::LIST`].
    pub const LIST: Self = Self::new(Permission::LIST);
    /// Toggler for [`Permission::READ`].
    pub const READ: Self = Self::new(Permission::READ);
    /// Toggler for [`Permission::WRITE`].
    pub const WRITE: Self = Self::new(Permission::WRITE);
    /// Toggler for [`Permission::EXECUTE`].
    pub const EXECUTE: Self = Self::new(Permission::EXECUTE);
    /// Toggler for [`Permission::DELETE`].
    pub const DELETE: Self = Self::new(Permission::DELETE);

    /// Builds a toggler for a zero or single-bit permission.
    pub const fn new(unit: Permission) -> Self {
        assert!(
            unit.is_cleared_or_lone(),
            "either the zeroth or only one bit has to be set, uniquely"
        );
        Self { unit }
    }

    /// The capability this toggler controls.
    pub const fn unit(&self) -> Permission {
        self.unit
    }

    /// Returns `current` with the unit bit set.
    pub fn set(&self, current: Permission) -> Permission {
        current | self.unit
    }

    /// Returns `current` with the unit bit cleared. Other bits are kept.
    pub fn unset(&self, current: Permission) -> Permission {
        current.difference(self.unit)
    }

    /// Returns `true` if the unit bit is set in `current`.
    pub fn was_set(&self, current: Permission) -> bool {
        self.unit.intersects(current)
    }
}
