//! Upstream user API adapter (randomuser.me and compatible servers)

pub mod client;
pub mod models;

pub use client::{PageSource, RandomUserClient};
pub use models::{PageResponse, RawLocation, RawLogin, RawName, RawUser};
