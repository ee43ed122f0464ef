//! Typed access to the marketplace REST backend.
//!
//! [`AdminApi`] is the seam the session, list and dashboard code depend
//! on; [`HttpAdminApi`] is the production implementation over `reqwest`.

pub mod client;
pub mod dto;

pub use client::{AdminApi, HttpAdminApi, PageRequest};
