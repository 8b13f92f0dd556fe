//! Domain models and types for Roster.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`UserUuid`])
//! - **Domain models** ([`User`], [`NewUser`], [`UserPatch`])
//! - **Error types** ([`RosterError`], [`UpstreamError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RosterError>`]:
//!
//! ```rust
//! use roster::domain::{RosterError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = roster::config::load_config("roster.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod user;

pub use errors::{RosterError, StoreError, UpstreamError};
pub use ids::UserUuid;
pub use result::Result;
pub use user::{NewUser, User, UserColumn, UserPatch};
