//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for database-less runs

pub mod memory;
pub mod persistence;
