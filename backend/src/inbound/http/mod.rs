//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bookmarks;
pub mod error;
pub mod health;
pub mod map;
pub mod schemas;
pub mod seo;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod tours;
pub mod users;

pub use error::ApiResult;
