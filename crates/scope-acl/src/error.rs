//! Error types for scope-acl.
//!
//! Two propagation styles coexist here:
//!
//! - Store operations (`register_user`, `insert`, ...) fail fast with a
//!   single [`Error`] and leave the store untouched.
//! - Text codecs (permission lists, scopes, rule blobs) keep going past a
//!   bad token. Every failure is pushed onto a [`ParseErrors`] accumulator
//!   and handed back next to the best-effort value inside [`Parsed`].

use std::fmt;

/// Result type alias for scope-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scope-acl
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A token could not be turned into a scope.
    #[error("invalid scope: {0:?}")]
    InvalidScope(String),

    /// A token did not name a known permission.
    #[error("unknown permission {0:?}")]
    InvalidPermission(String),

    /// The scope is already registered.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// The scope is not registered.
    #[error("user does not exist: {0}")]
    UserDoesNotExist(String),

    /// The store's mapping was never created.
    #[error("uninitialized ACL")]
    Uninitialized,

    /// One or more tokens failed while parsing text.
    #[error("{0}")]
    Parse(ParseErrors),

    /// Configuration could not be read.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether the error means the scope could not be found.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Error::UserDoesNotExist(_) | Error::Uninitialized)
    }

    /// Returns whether the error came from a single bad token.
    pub fn is_token_error(&self) -> bool {
        matches!(self, Error::InvalidScope(_) | Error::InvalidPermission(_))
    }
}

// ============================================================================
// ParseErrors
// ============================================================================

/// Ordered collection of token-level failures gathered during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<Error>,
}

impl ParseErrors {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Folds another accumulator into this one, preserving order.
    pub fn absorb(&mut self, other: ParseErrors) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the recorded failures in the order they happened.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Extend<Error> for ParseErrors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ParseErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// Parsed
// ============================================================================

/// A best-effort parse result.
///
/// `value` always holds everything that resolved, even when `errors` is
/// non-empty. Callers that want all-or-nothing semantics use
/// [`Parsed::into_result`].
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    value: T,
    errors: ParseErrors,
}

impl<T> Parsed<T> {
    pub(crate) fn new(value: T, errors: ParseErrors) -> Self {
        Self { value, errors }
    }

    /// The value built from every token that resolved.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The accumulated token failures.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Returns `true` if every token resolved.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits into the value and, if anything failed, the failures.
    pub fn into_parts(self) -> (T, Option<ParseErrors>) {
        if self.errors.is_empty() {
            (self.value, None)
        } else {
            (self.value, Some(self.errors))
        }
    }

    /// Discards the failures and keeps the partial value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Converts to a strict result, failing if any token failed.
    pub fn into_result(self) -> Result<T> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(Error::Parse(self.errors))
        }
    }

    /// Maps the carried value, keeping the failures.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            errors: self.errors,
        }
    }
}
