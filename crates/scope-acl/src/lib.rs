//! # scope-acl
//!
//! In-process access control lists keyed by principal.
//!
//! This crate provides:
//! - [`Permission`]: bit-field capabilities with a `|`-separated text form
//! - [`Scope`]: validated principal identifiers
//! - [`rules`]: the line-oriented rule language, parsed leniently and
//!   rendered canonically
//! - [`Acl`]: a mutex-guarded store with register, deregister, insert,
//!   remove, and check
//!
//! Enforcement, persistence, and transport belong to the host.

#![doc = include_str!("../README.md")]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod permission;
pub mod rules;
pub mod scope;
pub mod store;
pub mod types;

mod proptests;

pub use config::AclConfig;
pub use error::{Error, ParseErrors, Parsed, Result};
pub use permission::{Permission, Permissioner};
pub use scope::Scope;
pub use store::{Acl, NIL_ACL, render_acl};
pub use types::{AclId, CheckOutcome, RemoveOutcome};
