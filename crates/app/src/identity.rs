//! Identity provider seam.
//!
//! Authentication itself is an external capability; this module only
//! defines what the storefront needs from it: who is signed in, and a way
//! to sign out.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the buyer's profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuyerId(String);

impl BuyerId {
    /// Creates a buyer id.
    pub fn new(id: impl Into<String>) -> Self {
        BuyerId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BuyerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for BuyerId {
    fn from(value: &str) -> Self {
        BuyerId::new(value)
    }
}

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: BuyerId,
    pub email: String,
    pub display_name: Option<String>,
}

impl UserAccount {
    /// The name stamped onto orders; falls back to the email address.
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Errors reported by the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected or failed the request.
    #[error("identity provider error: {0}")]
    Provider(String),
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in account, or `None`.
    async fn current_user(&self) -> Result<Option<UserAccount>, IdentityError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}

/// Fixed in-process identity for tests and the demo CLI.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: Mutex<Option<UserAccount>>,
}

impl StaticIdentity {
    /// An identity that reports `user` as signed in.
    #[must_use]
    pub fn signed_in(user: UserAccount) -> Self {
        StaticIdentity {
            user: Mutex::new(Some(user)),
        }
    }

    /// An identity with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        StaticIdentity::default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Result<Option<UserAccount>, IdentityError> {
        Ok(self
            .user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        Ok(())
    }
}
