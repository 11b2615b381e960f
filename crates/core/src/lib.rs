//! Core business logic for Painel.
//!
//! This crate contains the dashboard aggregation logic with ZERO web or
//! database dependencies. The document store is reached only through the
//! [`store::DocumentStore`] trait.
//!
//! # Modules
//!
//! - `store` - document model and the read-only store abstraction
//! - `dashboard` - counts, status breakdowns, activity feed and snapshot service

pub mod dashboard;
pub mod store;
