//! Shared errors and configuration for Painel.
//!
//! This crate provides common items used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DashboardConfig, DatabaseConfig, ServerConfig};
pub use error::AppError;
