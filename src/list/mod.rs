//! List views: paged, filtered collections and their fetch lifecycle.

pub mod controller;
pub mod query;
pub mod resource;
pub mod shared;

pub use controller::{Completion, FetchState, FetchTicket, ListController};
pub use query::{FilterKind, ListQuery};
pub use resource::{Clients, ListResource, Payments, Professionals, Quotes, Services};
pub use shared::SharedListController;
