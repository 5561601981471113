//! Storefront domain and persistence modules for the Thali food-ordering
//! client: cart sessions, checkout, seller menus, and the external
//! collaborator seams they depend on.

pub mod config;
pub mod context;
pub mod documents;
pub mod domain;
pub mod identity;
pub mod media;
pub mod observability;
pub mod payment;
pub mod storage;

#[cfg(test)]
mod test;
