//! Checkout service.

use std::sync::Arc;

use futures::future::try_join_all;
use jiff::Timestamp;
use thali::{
    entries::SellerId,
    prices::Price,
    pricing::{grand_total, subtotal},
};
use tracing::info;

use crate::{
    domain::{
        buyers::BuyersRepository,
        orders::{BuyerOrder, DeliveryDetails, SellerOrder},
        sellers::SellersRepository,
    },
    identity::IdentityProvider,
    payment::PaymentGateway,
    storage::CartStorage,
};

use super::{
    errors::{CheckoutError, CommitSource},
    reconcile::{finalize_orders, resolve_sellers},
};

/// Summary handed back to the caller after a committed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Number of cart entries the order covered.
    pub entry_count: usize,
    pub subtotal: Price,
    pub grand_total: Price,
    pub placed_at: Timestamp,
}

/// Runs the purchase sequence: reconcile, charge, commit, clear.
pub struct CheckoutService {
    storage: CartStorage,
    identity: Arc<dyn IdentityProvider>,
    sellers: Arc<dyn SellersRepository>,
    buyers: Arc<dyn BuyersRepository>,
    payment: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    #[must_use]
    pub fn new(
        storage: CartStorage,
        identity: Arc<dyn IdentityProvider>,
        sellers: Arc<dyn SellersRepository>,
        buyers: Arc<dyn BuyersRepository>,
        payment: Arc<dyn PaymentGateway>,
    ) -> Self {
        CheckoutService {
            storage,
            identity,
            sellers,
            buyers,
            payment,
        }
    }

    /// Places the order held in storage.
    ///
    /// The cart is loaded tab-scope-first, entries without a seller are
    /// reconciled against the known menus, the grand total is charged, and
    /// the finalized records are appended: one concurrent append per
    /// seller plus a single batched append to the buyer's history. Only
    /// after every append succeeds are the store and both scopes cleared.
    ///
    /// On any failure the cart is left where it was, so the caller can
    /// surface the reason and let the user retry.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; [`CheckoutError::CommitFailed`] means the
    /// fan-out had started and records may be partially written.
    #[tracing::instrument(name = "checkout.service.checkout", skip_all, err)]
    pub async fn checkout(
        &self,
        delivery: Option<DeliveryDetails>,
    ) -> Result<OrderReceipt, CheckoutError> {
        let buyer = self
            .identity
            .current_user()
            .await?
            .ok_or(CheckoutError::NotSignedIn)?;

        let entries = self.storage.load()?.snapshot();
        if entries.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let entries = if entries.iter().any(|entry| entry.seller_id.is_none()) {
            let sellers = self.sellers.list_sellers().await?;
            resolve_sellers(entries, &sellers)?
        } else {
            entries
        };

        let subtotal = subtotal(&entries)?;
        let grand_total = grand_total(&entries)?;

        self.payment.charge(grand_total).await?;

        let placed_at = Timestamp::now();
        let orders = finalize_orders(&entries, &buyer, placed_at, delivery.as_ref())?;
        let groups = group_by_seller(orders);

        // Every seller is fetched before the first write, so an unknown
        // seller fails the checkout while nothing has been committed yet.
        let mut buyer_orders = Vec::with_capacity(entries.len());
        for (seller_id, group) in &groups {
            let seller = self.sellers.get_seller(seller_id).await?;

            buyer_orders.extend(
                group
                    .iter()
                    .map(|order| BuyerOrder::from_seller_order(order, seller.name.clone())),
            );
        }

        let seller_appends = async {
            try_join_all(
                groups
                    .iter()
                    .map(|(seller_id, group)| self.sellers.append_orders(seller_id, group)),
            )
            .await
            .map_err(|error| CheckoutError::CommitFailed(CommitSource::from(error)))
        };
        let buyer_append = async {
            self.buyers
                .append_orders(&buyer.id, &buyer_orders)
                .await
                .map_err(|error| CheckoutError::CommitFailed(CommitSource::from(error)))
        };

        futures::try_join!(seller_appends, buyer_append)?;

        self.storage.clear()?;

        info!(
            entries = entries.len(),
            sellers = groups.len(),
            total = %grand_total,
            "order committed"
        );

        Ok(OrderReceipt {
            entry_count: entries.len(),
            subtotal,
            grand_total,
            placed_at,
        })
    }
}

/// Groups finalized orders by seller, preserving first-seen order.
fn group_by_seller(orders: Vec<SellerOrder>) -> Vec<(SellerId, Vec<SellerOrder>)> {
    let mut groups: Vec<(SellerId, Vec<SellerOrder>)> = Vec::new();

    for order in orders {
        match groups
            .iter_mut()
            .find(|(seller_id, _)| *seller_id == order.seller_id)
        {
            Some((_, group)) => group.push(order),
            None => groups.push((order.seller_id.clone(), vec![order])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;
    use testresult::TestResult;
    use thali::{
        cart::CartStore,
        entries::{DishName, NewEntry},
        prices::Price,
    };

    use crate::{
        documents::{DocumentStoreError, MemoryDocumentStore},
        domain::{
            buyers::{DocBuyersRepository, MockBuyersRepository, models::NewBuyerProfile},
            sellers::{DocSellersRepository, MockSellersRepository, SellersRepositoryError},
        },
        identity::{BuyerId, StaticIdentity, UserAccount},
        payment::SimulatedGateway,
        storage::MemoryStore,
        test::helpers,
    };

    use super::*;

    fn asha() -> UserAccount {
        UserAccount {
            id: BuyerId::from("buyer-1"),
            email: "asha@example.com".to_owned(),
            display_name: Some("Asha".to_owned()),
        }
    }

    fn stored_cart(storage: &CartStorage, dishes: &[(&str, u64, u32, Option<&str>)]) {
        let mut cart = CartStore::new();

        for (name, major, quantity, seller) in dishes {
            cart.add(
                NewEntry {
                    name: DishName::from(*name),
                    price: Price::from_major(*major),
                    image_url: None,
                },
                SellerId::from(seller.unwrap_or("R1")),
            );
            if *quantity > 1 {
                cart.set_quantity(&DishName::from(*name), *quantity);
            }
        }

        storage.save(&cart).ok();
    }

    fn storage() -> (std::sync::Arc<MemoryStore>, CartStorage) {
        let durable = std::sync::Arc::new(MemoryStore::new());
        let tab = std::sync::Arc::new(MemoryStore::new());

        (durable.clone(), CartStorage::new(durable, tab))
    }

    fn gateway() -> Arc<SimulatedGateway> {
        Arc::new(SimulatedGateway::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn commit_issues_one_append_per_seller_and_one_buyer_batch() -> TestResult {
        let (_durable, cart_storage) = storage();
        stored_cart(
            &cart_storage,
            &[
                ("Paneer Tikka", 180, 2, Some("R1")),
                ("Lassi", 60, 1, Some("R2")),
            ],
        );

        let mut sellers = MockSellersRepository::new();
        sellers
            .expect_get_seller()
            .times(2)
            .returning(|id| Ok(helpers::seller_with_menu(id.as_str(), "Seller", &[])));
        sellers
            .expect_append_orders()
            .times(2)
            .returning(|_, _| Ok(()));

        let mut buyers = MockBuyersRepository::new();
        buyers
            .expect_append_orders()
            .times(1)
            .withf(|_, orders| orders.len() == 2)
            .returning(|_, _| Ok(()));

        let service = CheckoutService::new(
            cart_storage.clone(),
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(sellers),
            Arc::new(buyers),
            gateway(),
        );

        let receipt = service.checkout(None).await?;

        assert_eq!(receipt.entry_count, 2);
        assert_eq!(receipt.subtotal, Price::from_major(420));
        assert_eq!(receipt.grand_total, Price::from_major(460));
        assert!(cart_storage.load()?.is_empty(), "commit must clear the cart");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_requires_a_signed_in_user() {
        let (_durable, cart_storage) = storage();
        stored_cart(&cart_storage, &[("Lassi", 60, 1, Some("R1"))]);

        let service = CheckoutService::new(
            cart_storage,
            Arc::new(StaticIdentity::signed_out()),
            Arc::new(MockSellersRepository::new()),
            Arc::new(MockBuyersRepository::new()),
            gateway(),
        );

        let result = service.checkout(None).await;

        assert!(
            matches!(result, Err(CheckoutError::NotSignedIn)),
            "expected NotSignedIn, got {result:?}"
        );
    }

    #[tokio::test]
    async fn an_empty_cart_cannot_be_checked_out() {
        let (_durable, cart_storage) = storage();

        let service = CheckoutService::new(
            cart_storage,
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(MockSellersRepository::new()),
            Arc::new(MockBuyersRepository::new()),
            gateway(),
        );

        let result = service.checkout(None).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn entries_without_sellers_are_reconciled_end_to_end() -> TestResult {
        let documents = std::sync::Arc::new(MemoryDocumentStore::new());
        let sellers = DocSellersRepository::new(documents.clone());
        let buyers = DocBuyersRepository::new(documents.clone());

        let seller_id = sellers.create_seller(helpers::spice_route()).await?;
        sellers.add_dish(&seller_id, helpers::tikka_dish()).await?;
        buyers
            .create_profile(NewBuyerProfile {
                id: BuyerId::from("buyer-1"),
                name: "Asha".to_owned(),
                email: "asha@example.com".to_owned(),
            })
            .await?;

        let (_durable, cart_storage) = storage();
        let mut cart = CartStore::from_entries([thali::entries::CartEntry {
            name: DishName::from("Paneer Tikka"),
            price: Price::from_major(180),
            quantity: 1,
            image_url: None,
            seller_id: None,
        }]);
        cart.set_quantity(&DishName::from("Paneer Tikka"), 2);
        cart_storage.save(&cart)?;

        let service = CheckoutService::new(
            cart_storage,
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(sellers.clone()),
            Arc::new(buyers.clone()),
            gateway(),
        );

        service.checkout(None).await?;

        let seller = sellers.get_seller(&seller_id).await?;

        assert_eq!(seller.orders.len(), 1);
        assert_eq!(
            seller.orders.first().map(|o| o.seller_id.clone()),
            Some(seller_id)
        );

        let history = buyers.list_orders(&BuyerId::from("buyer-1")).await?;

        assert_eq!(history.len(), 1);
        assert_eq!(
            history.first().map(|o| o.seller_name.as_str()),
            Some("Spice Route")
        );

        Ok(())
    }

    #[tokio::test]
    async fn an_unresolvable_dish_fails_and_keeps_the_cart() -> TestResult {
        let (_durable, cart_storage) = storage();
        let cart = CartStore::from_entries([thali::entries::CartEntry {
            name: DishName::from("Phantom Curry"),
            price: Price::from_major(99),
            quantity: 1,
            image_url: None,
            seller_id: None,
        }]);
        cart_storage.save(&cart)?;

        let mut sellers = MockSellersRepository::new();
        sellers.expect_list_sellers().returning(|| Ok(Vec::new()));

        let service = CheckoutService::new(
            cart_storage.clone(),
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(sellers),
            Arc::new(MockBuyersRepository::new()),
            gateway(),
        );

        let result = service.checkout(None).await;

        assert!(
            matches!(result, Err(CheckoutError::UnresolvedDish(ref name)) if name.as_str() == "Phantom Curry"),
            "expected UnresolvedDish, got {result:?}"
        );
        assert_eq!(cart_storage.load()?, cart, "failed checkout must keep the cart");

        Ok(())
    }

    #[tokio::test]
    async fn a_failed_append_surfaces_as_commit_failure_and_keeps_the_cart() -> TestResult {
        let (_durable, cart_storage) = storage();
        stored_cart(&cart_storage, &[("Lassi", 60, 1, Some("R1"))]);

        let mut sellers = MockSellersRepository::new();
        sellers
            .expect_get_seller()
            .with(eq(SellerId::from("R1")))
            .returning(|id| Ok(helpers::seller_with_menu(id.as_str(), "Seller", &[])));
        sellers.expect_append_orders().returning(|_, _| {
            Err(SellersRepositoryError::Store(DocumentStoreError::Backend(
                "write rejected".to_owned(),
            )))
        });

        let mut buyers = MockBuyersRepository::new();
        buyers.expect_append_orders().returning(|_, _| Ok(()));

        let service = CheckoutService::new(
            cart_storage.clone(),
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(sellers),
            Arc::new(buyers),
            gateway(),
        );

        let result = service.checkout(None).await;

        assert!(
            matches!(result, Err(CheckoutError::CommitFailed(_))),
            "expected CommitFailed, got {result:?}"
        );
        assert!(
            !cart_storage.load()?.is_empty(),
            "failed commit must keep the cart for retry"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delivery_details_land_on_the_seller_copy_only() -> TestResult {
        let documents = std::sync::Arc::new(MemoryDocumentStore::new());
        let sellers = DocSellersRepository::new(documents.clone());
        let buyers = DocBuyersRepository::new(documents.clone());

        let seller_id = sellers.create_seller(helpers::spice_route()).await?;
        buyers
            .create_profile(NewBuyerProfile {
                id: BuyerId::from("buyer-1"),
                name: "Asha".to_owned(),
                email: "asha@example.com".to_owned(),
            })
            .await?;

        let (_durable, cart_storage) = storage();
        stored_cart(
            &cart_storage,
            &[("Lassi", 60, 1, Some(seller_id.as_str()))],
        );

        let service = CheckoutService::new(
            cart_storage,
            Arc::new(StaticIdentity::signed_in(asha())),
            Arc::new(sellers.clone()),
            Arc::new(buyers),
            gateway(),
        );

        let delivery = DeliveryDetails {
            address: "Flat 4B, Indiranagar".to_owned(),
            landmark: Some("opposite the park".to_owned()),
            delivery_status: None,
        };
        service.checkout(Some(delivery.clone())).await?;

        let seller = sellers.get_seller(&seller_id).await?;

        assert_eq!(
            seller.orders.first().and_then(|o| o.delivery.clone()),
            Some(delivery)
        );

        Ok(())
    }
}
