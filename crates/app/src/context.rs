//! App Context

use std::sync::Arc;

use crate::{
    documents::DocumentStore,
    domain::{
        buyers::{BuyersRepository, DocBuyersRepository},
        carts::CartSession,
        checkout::CheckoutService,
        menus::MenuAdminService,
        sellers::{DocSellersRepository, SellersRepository},
    },
    identity::IdentityProvider,
    media::MediaHost,
    payment::PaymentGateway,
    storage::{CartStorage, KeyValueStore},
};

/// The external collaborators the storefront is wired onto.
pub struct AppDeps {
    pub identity: Arc<dyn IdentityProvider>,
    pub documents: Arc<dyn DocumentStore>,
    pub media: Arc<dyn MediaHost>,
    pub payment: Arc<dyn PaymentGateway>,
    pub durable: Arc<dyn KeyValueStore>,
    pub tab: Arc<dyn KeyValueStore>,
}

/// Wired storefront services, shared by every page of the app.
#[derive(Clone)]
pub struct AppContext {
    pub identity: Arc<dyn IdentityProvider>,
    pub sellers: Arc<dyn SellersRepository>,
    pub buyers: Arc<dyn BuyersRepository>,
    pub checkout: Arc<CheckoutService>,
    pub menus: Arc<MenuAdminService>,
    storage: CartStorage,
}

impl AppContext {
    /// Build the application context from its collaborators.
    #[must_use]
    pub fn new(deps: AppDeps) -> Self {
        let storage = CartStorage::new(deps.durable.clone(), deps.tab);
        let sellers: Arc<dyn SellersRepository> =
            Arc::new(DocSellersRepository::new(deps.documents.clone()));
        let buyers: Arc<dyn BuyersRepository> =
            Arc::new(DocBuyersRepository::new(deps.documents));

        let checkout = Arc::new(CheckoutService::new(
            storage.clone(),
            deps.identity.clone(),
            sellers.clone(),
            buyers.clone(),
            deps.payment,
        ));
        let menus = Arc::new(MenuAdminService::new(
            sellers.clone(),
            deps.media,
            deps.durable,
        ));

        AppContext {
            identity: deps.identity,
            sellers,
            buyers,
            checkout,
            menus,
            storage,
        }
    }

    /// A cart session bound to this context's scopes; one per page view.
    #[must_use]
    pub fn cart_session(&self) -> CartSession {
        CartSession::new(self.storage.clone(), self.identity.clone())
    }

    /// The shared cart storage, for badge reads outside a session.
    #[must_use]
    pub fn storage(&self) -> &CartStorage {
        &self.storage
    }
}
