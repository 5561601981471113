//! End-to-end storefront flow over in-memory collaborators: seller
//! onboarding, menu administration, cart persistence across a reload, and
//! the order commit fan-out.

use std::{sync::Arc, time::Duration};

use testresult::TestResult;
use thali::{entries::DishName, prices::Price};
use thali_app::{
    context::{AppContext, AppDeps},
    documents::MemoryDocumentStore,
    domain::{
        buyers::{BuyersRepository, models::NewBuyerProfile},
        menus::{DishForm, ImageUpload, SellerForm},
        orders::history::{OrderWindow, display_total, recent_orders},
        sellers::SellersRepository,
    },
    identity::{BuyerId, StaticIdentity, UserAccount},
    media::{MockMediaHost, UploadedImage},
    payment::SimulatedGateway,
    storage::{CHECKOUT_CART_KEY, KeyValueStore, MemoryStore},
};

fn asha() -> UserAccount {
    UserAccount {
        id: BuyerId::from("buyer-1"),
        email: "asha@example.com".to_owned(),
        display_name: Some("Asha".to_owned()),
    }
}

struct Harness {
    durable: Arc<MemoryStore>,
    tab: Arc<MemoryStore>,
    app: AppContext,
}

fn harness() -> Harness {
    let durable = Arc::new(MemoryStore::new());
    let tab = Arc::new(MemoryStore::new());

    let mut media = MockMediaHost::new();
    media.expect_upload().returning(|filename, _| {
        Ok(UploadedImage {
            secure_url: format!("https://media.test/{filename}"),
        })
    });

    let app = AppContext::new(AppDeps {
        identity: Arc::new(StaticIdentity::signed_in(asha())),
        documents: Arc::new(MemoryDocumentStore::new()),
        media: Arc::new(media),
        payment: Arc::new(SimulatedGateway::new(Duration::ZERO)),
        durable: durable.clone(),
        tab: tab.clone(),
    });

    Harness { durable, tab, app }
}

fn image(filename: &str) -> Option<ImageUpload> {
    Some(ImageUpload {
        filename: filename.to_owned(),
        bytes: vec![0xAB, 0xCD],
    })
}

#[tokio::test]
async fn full_storefront_journey() -> TestResult {
    let harness = harness();
    let app = &harness.app;

    // Seller onboarding and menu administration.
    app.menus
        .register_seller(SellerForm {
            name: "Spice Route".to_owned(),
            address: "12 MG Road".to_owned(),
            contact: "9876543210".to_owned(),
            open: "09:00".to_owned(),
            close: "22:00".to_owned(),
            image: image("front.jpg"),
        })
        .await?;

    let seller_id = app.menus.enter_dashboard("9876543210").await?;

    app.menus
        .add_dish(
            &seller_id,
            DishForm {
                name: "Paneer Tikka".to_owned(),
                price: "180".to_owned(),
                description: "Char-grilled paneer skewers".to_owned(),
                image: image("tikka.jpg"),
            },
        )
        .await?;
    app.menus
        .add_dish(
            &seller_id,
            DishForm {
                name: "Lassi".to_owned(),
                price: "60".to_owned(),
                description: String::new(),
                image: image("lassi.jpg"),
            },
        )
        .await?;

    app.buyers
        .create_profile(NewBuyerProfile {
            id: asha().id,
            name: "Asha".to_owned(),
            email: asha().email,
        })
        .await?;

    // Browse and fill the cart: two tikka, one lassi.
    let seller = app.sellers.get_seller(&seller_id).await?;
    let mut cart = app.cart_session();
    cart.restore()?;

    for dish in &seller.menu {
        cart.add_item(dish.to_new_entry(), seller_id.clone()).await?;
    }
    if let Some(tikka) = seller.menu.first() {
        cart.add_item(tikka.to_new_entry(), seller_id.clone()).await?;
    }

    assert_eq!(cart.badge_count(), 3);

    // A reload: a fresh session sees the same cart.
    let mut cart = app.cart_session();
    cart.restore()?;

    assert_eq!(cart.badge_count(), 3);

    // Checkout commits to both sides and empties every scope.
    let receipt = app.checkout.checkout(None).await?;

    assert_eq!(receipt.entry_count, 2);
    assert_eq!(receipt.subtotal, Price::from_major(420));
    assert_eq!(receipt.grand_total, Price::from_major(460));

    let seller = app.sellers.get_seller(&seller_id).await?;

    assert_eq!(seller.orders.len(), 2);
    assert!(
        seller
            .orders
            .iter()
            .all(|order| order.seller_id == seller_id)
    );

    let history = app.buyers.list_orders(&asha().id).await?;

    assert_eq!(history.len(), 2);
    assert!(
        history
            .iter()
            .all(|order| order.seller_name == "Spice Route")
    );

    let tikka = history
        .iter()
        .find(|order| order.name == DishName::from("Paneer Tikka"))
        .ok_or("tikka order missing from history")?;

    assert_eq!(tikka.item_total, Price::from_major(360));
    assert_eq!(display_total(tikka)?, Price::from_major(400));

    assert_eq!(harness.durable.get("cart")?, None);
    assert_eq!(harness.tab.get(CHECKOUT_CART_KEY)?, None);
    assert_eq!(app.storage().badge_count()?, 0);

    let recent = recent_orders(&history, OrderWindow::Today, receipt.placed_at);

    assert_eq!(recent.len(), 2);

    Ok(())
}

#[tokio::test]
async fn carts_spanning_two_sellers_commit_to_both() -> TestResult {
    let harness = harness();
    let app = &harness.app;

    let first = app
        .menus
        .register_seller(SellerForm {
            name: "Spice Route".to_owned(),
            address: "12 MG Road".to_owned(),
            contact: "9876543210".to_owned(),
            open: "09:00".to_owned(),
            close: "22:00".to_owned(),
            image: image("a.jpg"),
        })
        .await?;
    let second = app
        .menus
        .register_seller(SellerForm {
            name: "Chai Corner".to_owned(),
            address: "3 Brigade Road".to_owned(),
            contact: "9000000000".to_owned(),
            open: "08:00".to_owned(),
            close: "20:00".to_owned(),
            image: image("b.jpg"),
        })
        .await?;

    app.menus
        .add_dish(
            &first,
            DishForm {
                name: "Paneer Tikka".to_owned(),
                price: "180".to_owned(),
                description: String::new(),
                image: image("tikka.jpg"),
            },
        )
        .await?;
    app.menus
        .add_dish(
            &second,
            DishForm {
                name: "Masala Chai".to_owned(),
                price: "30".to_owned(),
                description: String::new(),
                image: image("chai.jpg"),
            },
        )
        .await?;

    app.buyers
        .create_profile(NewBuyerProfile {
            id: asha().id,
            name: "Asha".to_owned(),
            email: asha().email,
        })
        .await?;

    let mut cart = app.cart_session();
    for (seller_id, dish_index) in [(&first, 0), (&second, 0)] {
        let seller = app.sellers.get_seller(seller_id).await?;
        let dish = seller
            .menu
            .get(dish_index)
            .ok_or("seeded dish missing")?
            .to_new_entry();

        cart.add_item(dish, seller_id.clone()).await?;
    }

    app.checkout.checkout(None).await?;

    // One append per seller, one batched buyer append covering both.
    assert_eq!(app.sellers.get_seller(&first).await?.orders.len(), 1);
    assert_eq!(app.sellers.get_seller(&second).await?.orders.len(), 1);
    assert_eq!(app.buyers.list_orders(&asha().id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn a_corrupt_stored_cart_restores_empty_and_blocks_checkout() -> TestResult {
    let harness = harness();

    harness.durable.set("cart", "{not json")?;

    let mut cart = harness.app.cart_session();
    cart.restore()?;

    assert!(cart.is_empty());

    let result = harness.app.checkout.checkout(None).await;

    assert!(
        result.is_err(),
        "checkout over an empty cart must fail, got {result:?}"
    );

    Ok(())
}
