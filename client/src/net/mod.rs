//! HTTP transport for the login endpoint.

pub mod api;
pub mod config;
pub mod error;
