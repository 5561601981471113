//! Test Helpers

use jiff::Timestamp;
use thali::{
    entries::{DishName, SellerId},
    prices::Price,
};

use crate::domain::{
    orders::{BuyerOrder, OrderStatus, SellerOrder},
    sellers::models::{MenuDish, NewSeller, Seller},
};

pub(crate) fn tikka_dish() -> MenuDish {
    MenuDish {
        name: DishName::from("Paneer Tikka"),
        price: Price::from_major(180),
        description: Some("Char-grilled paneer".to_owned()),
        image_url: None,
        created_at: None,
    }
}

pub(crate) fn lassi_dish() -> MenuDish {
    MenuDish {
        name: DishName::from("Lassi"),
        price: Price::from_major(60),
        description: None,
        image_url: None,
        created_at: None,
    }
}

pub(crate) fn spice_route() -> NewSeller {
    NewSeller {
        name: "Spice Route".to_owned(),
        address: "12 MG Road".to_owned(),
        contact: "9876543210".to_owned(),
        open: "09:00".to_owned(),
        close: "22:00".to_owned(),
        image_url: None,
    }
}

pub(crate) fn seller_with_menu(id: &str, name: &str, dishes: &[(&str, u64)]) -> Seller {
    Seller {
        id: SellerId::from(id),
        name: name.to_owned(),
        address: None,
        contact: None,
        open: None,
        close: None,
        image_url: None,
        rating: None,
        created_at: None,
        menu: dishes
            .iter()
            .map(|(dish, major)| MenuDish {
                name: DishName::from(*dish),
                price: Price::from_major(*major),
                description: None,
                image_url: None,
                created_at: None,
            })
            .collect(),
        orders: Vec::new(),
    }
}

pub(crate) fn seller_order(
    seller: &SellerId,
    dish: &str,
    major: u64,
    quantity: u32,
) -> SellerOrder {
    SellerOrder {
        order_id: format!("order-{dish}"),
        name: DishName::from(dish),
        price: Price::from_major(major),
        quantity,
        image_url: None,
        seller_id: seller.clone(),
        item_total: Price::from_minor(major * 100 * u64::from(quantity)),
        ordered_by: "asha@example.com".to_owned(),
        ordered_at: Timestamp::UNIX_EPOCH,
        buyer_display_name: "Asha".to_owned(),
        status: OrderStatus::paid(),
        delivery: None,
    }
}

pub(crate) fn buyer_order(dish: &str, major: u64, quantity: u32, seller_name: &str) -> BuyerOrder {
    BuyerOrder {
        order_id: format!("order-{dish}"),
        name: DishName::from(dish),
        price: Price::from_major(major),
        quantity,
        image_url: None,
        item_total: Price::from_minor(major * 100 * u64::from(quantity)),
        ordered_by: "asha@example.com".to_owned(),
        ordered_at: Timestamp::UNIX_EPOCH,
        buyer_display_name: "Asha".to_owned(),
        status: OrderStatus::paid(),
        seller_name: seller_name.to_owned(),
    }
}
