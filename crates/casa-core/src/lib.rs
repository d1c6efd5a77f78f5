//! Shared configuration, errors and vocabulary for the casa workspace.

pub mod config;
pub mod error;
pub mod types;
