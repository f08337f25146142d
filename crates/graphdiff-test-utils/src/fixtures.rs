//! Sample entity model
//!
//! ```text
//! Customer ─┬─ Address
//!           ├─ Contacts: Vec<Contact>
//!           └─ Orders:   Vec<Order> ─┬─ Items: Vec<Item>
//!                                    └─ Shipment
//! ```

use graphdiff_expr::{MemberAccessor, Property};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub name: String,
    pub address: Address,
    pub contacts: Vec<Contact>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub number: u32,
    pub items: Vec<Item>,
    pub shipment: Shipment,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub sku: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shipment {
    pub carrier: String,
}

pub fn customer_address() -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Customer, Address>::new(
        "Address",
        |c| &c.address,
        |c, v| c.address = v,
    ))
}

pub fn customer_contacts() -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Customer, Vec<Contact>>::new(
        "Contacts",
        |c| &c.contacts,
        |c, v| c.contacts = v,
    ))
}

pub fn customer_orders() -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Customer, Vec<Order>>::new(
        "Orders",
        |c| &c.orders,
        |c, v| c.orders = v,
    ))
}

pub fn order_items() -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Order, Vec<Item>>::new(
        "Items",
        |o| &o.items,
        |o, v| o.items = v,
    ))
}

pub fn order_shipment() -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Order, Shipment>::new(
        "Shipment",
        |o| &o.shipment,
        |o, v| o.shipment = v,
    ))
}

/// Accessor with an arbitrary member name, for generated mappings
pub fn named_member(name: &str) -> Arc<dyn MemberAccessor> {
    Arc::new(Property::<Customer, String>::new(
        name,
        |c| &c.name,
        |c, v| c.name = v,
    ))
}
