//! PostgreSQL user store
//!
//! Uses `deadpool-postgres` for pooling and `ON CONFLICT (uuid) DO NOTHING`
//! for insert-or-ignore semantics.

pub mod adapter;
pub mod client;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
