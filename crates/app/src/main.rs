//! Thali storefront CLI

use std::{process, sync::Arc};

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use thali::prices::Price;
use thali_app::{
    config::StorefrontConfig,
    context::{AppContext, AppDeps},
    documents::MemoryDocumentStore,
    domain::{
        buyers::{BuyersRepository, models::NewBuyerProfile},
        orders::{DeliveryDetails, history},
        sellers::{
            SellersRepository, hours,
            models::{MenuDish, NewSeller},
        },
    },
    identity::{BuyerId, StaticIdentity, UserAccount},
    media::CloudinaryClient,
    observability::init_tracing,
    payment::SimulatedGateway,
    storage::MemoryStore,
};

#[derive(Debug, Parser)]
#[command(name = "thali-app", about = "Thali storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a scripted storefront session against in-memory services.
    Demo,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(&cli.config.log_level);

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Demo => demo(&cli.config).await,
    }
}

async fn demo(config: &StorefrontConfig) -> Result<(), String> {
    let buyer = UserAccount {
        id: BuyerId::from("buyer-1"),
        email: "asha@example.com".to_owned(),
        display_name: Some("Asha".to_owned()),
    };

    let app = AppContext::new(AppDeps {
        identity: Arc::new(StaticIdentity::signed_in(buyer.clone())),
        documents: Arc::new(MemoryDocumentStore::new()),
        media: Arc::new(CloudinaryClient::new(config.media.clone())),
        payment: Arc::new(SimulatedGateway::new(config.payment_delay())),
        durable: Arc::new(MemoryStore::new()),
        tab: Arc::new(MemoryStore::new()),
    });

    let seller_id = app
        .sellers
        .create_seller(NewSeller {
            name: "Spice Route".to_owned(),
            address: "12 MG Road".to_owned(),
            contact: "9876543210".to_owned(),
            open: "09:00".to_owned(),
            close: "22:00".to_owned(),
            image_url: None,
        })
        .await
        .map_err(|error| format!("failed to register seller: {error}"))?;

    for (name, price, description) in [
        ("Paneer Tikka", "180", "Char-grilled paneer skewers"),
        ("Lassi", "60", "Sweet churned yogurt"),
    ] {
        app.sellers
            .add_dish(
                &seller_id,
                MenuDish {
                    name: name.into(),
                    price: Price::parse(price)
                        .map_err(|error| format!("bad demo price: {error}"))?,
                    description: Some(description.to_owned()),
                    image_url: None,
                    created_at: Some(Timestamp::now()),
                },
            )
            .await
            .map_err(|error| format!("failed to add dish: {error}"))?;
    }

    app.buyers
        .create_profile(NewBuyerProfile {
            id: buyer.id.clone(),
            name: "Asha".to_owned(),
            email: buyer.email.clone(),
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    let seller = app
        .sellers
        .get_seller(&seller_id)
        .await
        .map_err(|error| format!("failed to load seller: {error}"))?;

    let status = if hours::is_open_at(&seller, jiff::Zoned::now().time()) {
        "open now"
    } else {
        "closed"
    };

    println!(
        "{} ({status}), {} dishes on the menu",
        seller.name,
        seller.menu.len()
    );

    let mut cart = app.cart_session();
    cart.restore()
        .map_err(|error| format!("failed to restore cart: {error}"))?;

    for dish in &seller.menu {
        cart.add_item(dish.to_new_entry(), seller_id.clone())
            .await
            .map_err(|error| format!("failed to add to cart: {error}"))?;
    }
    if let Some(first) = seller.menu.first() {
        cart.add_item(first.to_new_entry(), seller_id.clone())
            .await
            .map_err(|error| format!("failed to add to cart: {error}"))?;
    }

    let entries = cart.snapshot();
    for entry in &entries {
        let line = thali::pricing::line_total(entry)
            .map_err(|error| format!("cart total failed: {error}"))?;

        println!("  {} x {}: {line}", entry.quantity, entry.name);
    }

    let receipt = app
        .checkout
        .checkout(Some(DeliveryDetails {
            address: "Flat 4B, Indiranagar".to_owned(),
            landmark: Some("opposite the park".to_owned()),
            delivery_status: None,
        }))
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!(
        "paid {} ({} + delivery) for {} items",
        receipt.grand_total, receipt.subtotal, receipt.entry_count
    );

    let history_entries = app
        .buyers
        .list_orders(&buyer.id)
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;
    let now = Timestamp::now();

    for order in history::recent_orders(&history_entries, history::OrderWindow::All, now) {
        let total = history::display_total(&order)
            .map_err(|error| format!("order total failed: {error}"))?;

        println!(
            "  {} from {}: {total} ({})",
            order.name,
            order.seller_name,
            history::format_order_date(order.ordered_at, now)
        );
    }

    Ok(())
}
