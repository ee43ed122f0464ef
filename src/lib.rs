//! Marcenaria admin client library
//!
//! Session handling, paged list views and the REST client behind the
//! `marcenaria-admin` command-line tool.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod list;
pub mod logger;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod ui;

#[cfg(test)]
mod testing;

pub use state::AppContext;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
