//! Store abstraction layer
//!
//! This module provides a trait-based abstraction for user storage,
//! allowing Roster to run against PostgreSQL or an in-process store.

pub mod factory;
pub mod traits;

pub use factory::create_user_store;
pub use traits::UserStore;
