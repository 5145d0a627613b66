//! Principal identifiers.
//!
//! A [`Scope`] is a free-form, non-empty string naming whoever holds
//! permissions: a user id, a domain, a group name. Distinct strings are
//! distinct scopes and no scope is nested inside another.
//!
//! Parsing trims the input and splits it on `:`. Blank pieces are skipped
//! and the rest are rejoined with `:`, so `" a : b "` and `"a::b"` both
//! name the scope `a:b`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ParseErrors, Parsed, Result};
use crate::permission;
use crate::rules::PERMISSION_DELIMITER;

/// Separator between scope pieces.
pub const SEPARATOR: &str = ":";

const UNKNOWN_SCOPE: &str = "unknownScope";

/// Identifier for a principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Parses strictly; any rejected piece fails the whole scope with
    /// [`Error::InvalidScope`] naming the full input.
    pub fn new(text: &str) -> Result<Scope> {
        match Scope::parse_lenient(text).into_parts() {
            (scope, None) => Ok(scope),
            (_, Some(_)) => Err(Error::InvalidScope(text.to_string())),
        }
    }

    /// The placeholder returned alongside a failed parse.
    pub fn unknown() -> Scope {
        Scope(UNKNOWN_SCOPE.to_string())
    }

    /// Parses a scope, keeping every piece that validates.
    ///
    /// Blank input, and input whose pieces all fail, yield
    /// [`Scope::unknown`] with an [`Error::InvalidScope`].
    pub fn parse_lenient(text: &str) -> Parsed<Scope> {
        let mut errors = ParseErrors::new();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            errors.push(Error::InvalidScope(text.to_string()));
            return Parsed::new(Scope::unknown(), errors);
        }

        let mut scope = Scope(String::new());
        for piece in trimmed.split(SEPARATOR).map(str::trim) {
            if piece.is_empty() {
                continue;
            }
            match validate_piece(piece) {
                Ok(piece) => scope.combine(piece),
                Err(e) => errors.push(e),
            }
        }

        if scope.0.is_empty() {
            if errors.is_empty() {
                errors.push(Error::InvalidScope(text.to_string()));
            }
            return Parsed::new(Scope::unknown(), errors);
        }
        Parsed::new(scope, errors)
    }

    /// Appends `other`'s pieces to this scope.
    pub fn combine(&mut self, other: Scope) {
        if self.0.is_empty() {
            self.0 = other.0;
        } else if !other.0.is_empty() {
            self.0.push_str(SEPARATOR);
            self.0.push_str(&other.0);
        }
    }

    /// Returns the scope as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// A piece may not carry the rule language's other delimiters, or the
// rendered rule would read back as a different scope.
fn validate_piece(piece: &str) -> Result<Scope> {
    if piece.chars().any(char::is_control)
        || piece.contains(PERMISSION_DELIMITER)
        || piece.contains(permission::SEPARATOR)
    {
        return Err(Error::InvalidScope(piece.to_string()));
    }
    Ok(Scope(piece.to_string()))
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scope::new(s)
    }
}

impl TryFrom<String> for Scope {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Scope::new(&s)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.0
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
