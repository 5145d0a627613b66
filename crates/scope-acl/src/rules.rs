//! The textual rule language.
//!
//! ```text
//! rules   = rule *( "\n" rule )
//! rule    = segment *( ":" segment )
//! segment = scope *( "-" perms )
//! perms   = name *( "|" name )
//! ```
//!
//! Every `:`-segment stands on its own: its leading token is a scope and
//! any `-`-separated permission lists that follow are granted to that
//! scope only. A segment holding just a scope registers it with no
//! permissions. Blank rules, segments, and names are skipped.
//!
//! ```rust
//! use scope_acl::rules::{parse_rules, render_rules};
//!
//! let parsed = parse_rules("public-write|read:private-execute:private");
//! assert!(parsed.is_clean());
//! assert_eq!(
//!     render_rules(parsed.value()),
//!     "private-execute\npublic-read|write"
//! );
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{ParseErrors, Parsed};
use crate::permission::{self, Permission};
use crate::scope::{self, Scope};

/// Separator between rules.
pub const RULE_SEPARATOR: &str = "\n";

/// Separator between a scope and its permission list.
pub const PERMISSION_DELIMITER: &str = "-";

/// Permissions held by one scope.
pub type PermissionSet = HashSet<Permission>;

/// Scope to permission-set mapping. A present key means "registered".
pub type RuleMap = HashMap<Scope, PermissionSet>;

/// Ordered copy of a [`RuleMap`], convenient for comparisons.
pub type RuleSnapshot = BTreeMap<Scope, BTreeSet<Permission>>;

/// Parses rule text into a mapping, recovering from bad tokens.
///
/// A segment whose scope fails to parse contributes nothing. An unknown
/// permission name is skipped while the rest of its list still applies.
/// Permission lists are stored as single-bit permissions, so `read|write`
/// becomes two members.
pub fn parse_rules(text: &str) -> Parsed<RuleMap> {
    let mut rules = RuleMap::new();
    let mut errors = ParseErrors::new();

    for rule in text.split(RULE_SEPARATOR).map(str::trim) {
        if rule.is_empty() {
            continue;
        }

        for segment in rule.split(scope::SEPARATOR).map(str::trim) {
            if segment.is_empty() {
                continue;
            }

            let mut tokens = segment.split(PERMISSION_DELIMITER);
            let head = tokens.next().unwrap_or_default();
            let (scope, scope_errors) = Scope::parse_lenient(head).into_parts();
            if let Some(scope_errors) = scope_errors {
                errors.absorb(scope_errors);
                continue;
            }

            let permissions = rules.entry(scope).or_default();
            for list in tokens {
                let (granted, list_errors) = Permission::parse_lenient(list).into_parts();
                if let Some(list_errors) = list_errors {
                    errors.absorb(list_errors);
                }
                permissions.extend(granted.units());
            }
        }
    }

    if errors.is_empty() {
        log::debug!("Parsed rules for {} scope(s)", rules.len());
    } else {
        log::warn!(
            "Parsed rules for {} scope(s) with {} rejected token(s)",
            rules.len(),
            errors.len()
        );
    }
    Parsed::new(rules, errors)
}

/// Renders a mapping as canonical rule text.
///
/// One line per scope, ordered by scope text. Permission names within a
/// line are ordered by their text too. A scope with no permissions is
/// written bare.
pub fn render_rules(rules: &RuleMap) -> String {
    let mut lines: Vec<(String, String)> = rules
        .iter()
        .map(|(scope, permissions)| {
            let mut names: Vec<String> = permissions.iter().map(ToString::to_string).collect();
            names.sort();
            (scope.to_string(), names.join(permission::SEPARATOR))
        })
        .collect();
    lines.sort();

    lines
        .into_iter()
        .map(|(scope, names)| {
            if names.is_empty() {
                scope
            } else {
                format!("{scope}{PERMISSION_DELIMITER}{names}")
            }
        })
        .collect::<Vec<_>>()
        .join(RULE_SEPARATOR)
}

/// Copies a mapping into ordered collections.
pub fn snapshot(rules: &RuleMap) -> RuleSnapshot {
    rules
        .iter()
        .map(|(scope, permissions)| (scope.clone(), permissions.iter().copied().collect()))
        .collect()
}
