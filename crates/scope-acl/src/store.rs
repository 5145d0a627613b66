//! The concurrency-safe ACL store.
//!
//! An [`Acl`] owns a scope to permission-set mapping behind one mutex.
//! Every operation holds the lock for its whole body, so operations on a
//! single store are linearizable. Share a store across threads or tasks
//! as `Arc<Acl>`.
//!
//! # Usage
//!
//! ```rust
//! use scope_acl::{Acl, Permission};
//!
//! let acl = Acl::default();
//! acl.register_user("ingredient").unwrap();
//! acl.insert("ingredient", &[Permission::DELETE, Permission::WRITE]).unwrap();
//!
//! let outcome = acl
//!     .check("ingredient", &[Permission::DELETE, Permission::WRITE, Permission::READ])
//!     .unwrap();
//! assert_eq!(outcome.was_set, vec![Permission::DELETE, Permission::WRITE]);
//! assert_eq!(outcome.not_set, vec![Permission::READ]);
//!
//! assert_eq!(acl.to_string(), "ingredient-delete|write");
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::AclConfig;
use crate::error::{Error, Parsed, Result};
use crate::permission::Permission;
use crate::rules::{self, PermissionSet, RuleMap, RuleSnapshot};
use crate::scope::Scope;
use crate::types::{AclId, CheckOutcome, RemoveOutcome};

/// Text rendered for an absent store.
pub const NIL_ACL: &str = "[nil]";

/// A scope to permission-set access control list.
///
/// [`Acl::default`] is zero-valued: its mapping does not exist yet.
/// [`Acl::register_user`] creates it on demand; `deregister_user` and
/// `check` report [`Error::Uninitialized`] until then.
#[derive(Debug)]
pub struct Acl {
    id: AclId,
    name: String,
    ttl: Option<Duration>,
    rules: Mutex<Option<RuleMap>>,
}

impl Default for Acl {
    fn default() -> Self {
        Self {
            id: AclId::new(),
            name: String::new(),
            ttl: None,
            rules: Mutex::new(None),
        }
    }
}

impl Acl {
    /// Creates a store with an initialized, empty mapping.
    pub fn empty() -> Self {
        Self::with_rules(RuleMap::new())
    }

    /// Builds a store from rule text. Same as [`Acl::parse`].
    pub fn new(text: &str) -> Parsed<Acl> {
        Self::parse(text)
    }

    /// Builds a store from rule text.
    ///
    /// The store is always returned, holding everything that resolved;
    /// rejected tokens are reported next to it. See [`crate::rules`].
    pub fn parse(text: &str) -> Parsed<Acl> {
        rules::parse_rules(text).map(Self::with_rules)
    }

    /// Builds a store from configuration.
    pub fn from_config(config: &AclConfig) -> Parsed<Acl> {
        Self::parse(&config.rules).map(|acl| {
            let acl = match &config.name {
                Some(name) => acl.with_name(name.clone()),
                None => acl,
            };
            match config.ttl() {
                Some(ttl) => acl.with_ttl(ttl),
                None => acl,
            }
        })
    }

    fn with_rules(rules: RuleMap) -> Self {
        Self {
            rules: Mutex::new(Some(rules)),
            ..Self::default()
        }
    }

    /// Sets a human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the time-to-live. Stored only; nothing expires.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The identity tag assigned at construction.
    pub fn id(&self) -> AclId {
        self.id
    }

    /// The store's name; empty unless set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured time-to-live, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // The mapping is only touched through single map operations, so a
    // panic elsewhere never leaves it half-updated.
    fn lock(&self) -> MutexGuard<'_, Option<RuleMap>> {
        self.rules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Registers a scope with no permissions.
    ///
    /// Fails with [`Error::InvalidScope`] if `id` does not parse and with
    /// [`Error::UserAlreadyExists`] if it is already registered; the
    /// existing permissions are left alone.
    pub fn register_user(&self, id: &str) -> Result<()> {
        let mut guard = self.lock();
        let scope = Scope::new(id)?;
        let rules = guard.get_or_insert_with(RuleMap::new);

        if rules.contains_key(&scope) {
            return Err(Error::UserAlreadyExists(scope.to_string()));
        }

        log::debug!("ACL {}: registered '{scope}'", self.id);
        rules.insert(scope, PermissionSet::new());
        Ok(())
    }

    /// Removes a scope and every permission it holds.
    pub fn deregister_user(&self, id: &str) -> Result<()> {
        let mut guard = self.lock();
        let rules = guard.as_mut().ok_or(Error::Uninitialized)?;
        let scope = Scope::new(id)?;

        if rules.remove(&scope).is_none() {
            return Err(Error::UserDoesNotExist(scope.to_string()));
        }

        log::debug!("ACL {}: deregistered '{scope}'", self.id);
        Ok(())
    }

    /// Grants permissions to a registered scope.
    ///
    /// Composite values are split into their units and [`Permission::NONE`]
    /// grants nothing, as in parsed rule text. Returns the units that were
    /// newly added, in request order. Units already held are skipped
    /// without error.
    pub fn insert(&self, id: &str, permissions: &[Permission]) -> Result<Vec<Permission>> {
        let mut guard = self.lock();
        let scope = Scope::new(id)?;
        let held = held_by(&mut guard, &scope)?;
        let requested = units_of(permissions)?;

        let added: Vec<Permission> = requested
            .into_iter()
            .filter(|permission| held.insert(*permission))
            .collect();

        log::trace!(
            "ACL {}: '{scope}' +{} of {} requested",
            self.id,
            added.len(),
            permissions.len()
        );
        Ok(added)
    }

    /// Revokes permissions from a registered scope.
    ///
    /// Requests are split into units like [`Acl::insert`]. Each unit lands
    /// in `removed` if this call removed it, including repeats of one
    /// removed earlier in the same call, and in `not_removed` otherwise.
    pub fn remove(&self, id: &str, permissions: &[Permission]) -> Result<RemoveOutcome> {
        let mut guard = self.lock();
        let scope = Scope::new(id)?;
        let held = held_by(&mut guard, &scope)?;
        let requested = units_of(permissions)?;

        let mut removed_this_call = HashSet::new();
        let mut outcome = RemoveOutcome::default();
        for permission in requested {
            if held.remove(&permission) {
                removed_this_call.insert(permission);
                outcome.removed.push(permission);
            } else if removed_this_call.contains(&permission) {
                outcome.removed.push(permission);
            } else {
                outcome.not_removed.push(permission);
            }
        }

        log::trace!(
            "ACL {}: '{scope}' -{} of {} requested",
            self.id,
            removed_this_call.len(),
            permissions.len()
        );
        Ok(outcome)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Splits the requested units into held and not held.
    ///
    /// A composite request is checked unit by unit, so `READ | WRITE`
    /// reports `READ` and `WRITE` separately.
    pub fn check(&self, id: &str, permissions: &[Permission]) -> Result<CheckOutcome> {
        let guard = self.lock();
        let rules = guard.as_ref().ok_or(Error::Uninitialized)?;
        let scope = Scope::new(id)?;
        let held = rules
            .get(&scope)
            .ok_or_else(|| Error::UserDoesNotExist(scope.to_string()))?;

        let (was_set, not_set) = units_of(permissions)?
            .into_iter()
            .partition(|permission| held.contains(permission));

        log::trace!("ACL {}: checked '{scope}'", self.id);
        Ok(CheckOutcome { was_set, not_set })
    }

    /// The permissions a registered scope holds.
    pub fn permissions_of(&self, id: &str) -> Result<BTreeSet<Permission>> {
        let guard = self.lock();
        let rules = guard.as_ref().ok_or(Error::Uninitialized)?;
        let scope = Scope::new(id)?;
        rules
            .get(&scope)
            .map(|held| held.iter().copied().collect())
            .ok_or_else(|| Error::UserDoesNotExist(scope.to_string()))
    }

    /// Returns `true` if `id` parses and is registered.
    pub fn contains_user(&self, id: &str) -> bool {
        let Ok(scope) = Scope::new(id) else {
            return false;
        };
        self.lock()
            .as_ref()
            .is_some_and(|rules| rules.contains_key(&scope))
    }

    /// Returns `true` once the mapping exists.
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// Number of registered scopes.
    pub fn len(&self) -> usize {
        self.lock().as_ref().map_or(0, RuleMap::len)
    }

    /// Returns `true` if no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered scopes in lexicographic order.
    pub fn scopes(&self) -> Vec<Scope> {
        let mut scopes: Vec<Scope> = self
            .lock()
            .as_ref()
            .map(|rules| rules.keys().cloned().collect())
            .unwrap_or_default();
        scopes.sort();
        scopes
    }

    /// An ordered copy of the whole mapping.
    pub fn snapshot(&self) -> RuleSnapshot {
        self.lock()
            .as_ref()
            .map(rules::snapshot)
            .unwrap_or_default()
    }
}

// Stored sets only ever hold named single-bit units. Unnamed bits are
// rejected before anything is touched.
fn units_of(permissions: &[Permission]) -> Result<Vec<Permission>> {
    for permission in permissions {
        if !Permission::all().contains(*permission) {
            return Err(Error::InvalidPermission(permission.to_string()));
        }
    }
    Ok(permissions.iter().flat_map(|p| p.units()).collect())
}

fn held_by<'a>(rules: &'a mut Option<RuleMap>, scope: &Scope) -> Result<&'a mut PermissionSet> {
    rules
        .as_mut()
        .and_then(|rules| rules.get_mut(scope))
        .ok_or_else(|| Error::UserDoesNotExist(scope.to_string()))
}

impl fmt::Display for Acl {
    /// Canonical rule text; empty for an uninitialized or empty store.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lock().as_ref() {
            Some(rules) => f.write_str(&rules::render_rules(rules)),
            None => Ok(()),
        }
    }
}

impl FromStr for Acl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Acl::parse(s).into_result()
    }
}

/// Renders an optional store, using [`NIL_ACL`] when it is absent.
pub fn render_acl(acl: Option<&Acl>) -> String {
    match acl {
        Some(acl) => acl.to_string(),
        None => NIL_ACL.to_string(),
    }
}
