//! Outbound HTTP plumbing shared by the backend API client.

pub mod client;

pub use client::build_http_client;
