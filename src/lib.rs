//! # session-guard
//!
//! Client-side session bootstrap and navigation guarding.
//!
//! At startup the persisted session record is restored from a key-value
//! store; when it carries a token, every outgoing request gets
//! `Authorization: Bearer <token>` and the session context is flagged as
//! authenticated. Every navigation afterwards is checked by a guard that
//! sends unauthenticated visitors of restricted paths to the login route.
//!
//! DESIGN
//! ======
//! No ambient globals: the authentication flag and default headers live in
//! an explicit `SessionContext` handed to whoever needs them. Storage and
//! routing are traits so hosts can plug in their own.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod guard;
pub mod headers;
pub mod router;
pub mod session;
pub mod store;

pub use error::SessionError;
