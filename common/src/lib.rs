//! Shared model and configuration types for the `hostmap` workspace.

pub mod config;
pub mod error;
pub mod network;
