pub mod config;
pub mod db;
pub mod error;

// Ingredient search
pub mod search;

// Accounts and tokens
pub mod auth;

// HTTP API
pub mod api;

// Command-line interface
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
