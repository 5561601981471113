//! Order records and history views.

pub mod history;
pub mod models;

pub use models::*;
