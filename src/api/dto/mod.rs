//! Data transfer objects exchanged with the marketplace backend.

pub mod auth;
pub mod dashboard;
pub mod envelope;
pub mod pagination;
pub mod party;
pub mod payment;
pub mod quote;
pub mod service;
pub mod status;
pub mod user;

pub use auth::{AuthTokens, LoginRequest, LoginResponse};
pub use dashboard::DashboardStats;
pub use envelope::ApiEnvelope;
pub use pagination::{Page, Pagination};
pub use party::PartyRef;
pub use payment::Transaction;
pub use quote::Quote;
pub use service::Service;
pub use status::{PaymentStatus, QuoteStatus, ServiceCategory, ServiceStatus, UserRole};
pub use user::User;
