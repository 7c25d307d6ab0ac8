//! Invoice Desk Core Library
//! Session context, authenticated request gateway, and API calls for invoicing,
//! billing, payments, and currency conversion

pub mod config;
pub mod error;
pub mod session;
pub mod gateway;
pub mod auth;
pub mod invoices;
pub mod user;
pub mod billing;
pub mod payments;
pub mod currency;
pub mod format;
pub mod notice;

pub use error::{RequestFailed, SessionError};
pub use gateway::{Gateway, RequestBody, RequestDescriptor};
pub use session::Session;
