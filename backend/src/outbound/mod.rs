//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **tour_api**: KorService2 REST client (reqwest) behind `TourSource`.
//! - **persistence**: PostgreSQL-backed user and bookmark repositories using
//!   Diesel ORM.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod tour_api;
