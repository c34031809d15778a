//! Back-office order list: status names, totals, search and ordering.

mod export;

pub use crate::orders::export::{
    export_file_name, export_orders_csv, format_order_date, ORDER_CSV_HEADERS,
};

use crate::str_utils::contains_lowercase;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Flat shipping charge shown on every order.
pub const SHIPPING_COST: f64 = 5000.0;

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendiente,
    Pagada,
    EnPreparacion,
    Enviada,
    Entregada,
    Cancelada,
}

impl OrderStatus {
    /// Name shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::Pagada => "Pagada",
            OrderStatus::EnPreparacion => "En Preparación",
            OrderStatus::Enviada => "Enviada",
            OrderStatus::Entregada => "Entregada",
            OrderStatus::Cancelada => "Cancelada",
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub producto_nombre: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cantidad: u32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub precio_unitario: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub subtotal: f64,
}

/// An order as the backend lists it. Missing text fields read as empty.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: u64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub numero_orden: String,

    pub fecha_creacion: Option<NaiveDateTime>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub usuario_nombre: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub usuario_correo: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub direccion_envio: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub region_envio: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub comuna_envio: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub items: Vec<OrderItem>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub subtotal: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub total: f64,

    pub estado: Option<OrderStatus>,

    pub notas: Option<String>,
}

impl Order {
    /// Units across every line of the order.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.cantidad).sum()
    }

    pub fn shipping_cost(&self) -> f64 {
        SHIPPING_COST
    }

    /// The status label, or an empty string when the order has none.
    pub fn status_label(&self) -> &'static str {
        self.estado.map(|estado| estado.label()).unwrap_or_default()
    }
}

/// Sorts newest first. Orders without a creation date go last, keeping their
/// relative order.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));
}

/// Case-insensitive search over order number, customer email and customer
/// name. A blank query keeps every order.
pub fn search_orders<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    if query.trim().is_empty() {
        return orders.iter().collect();
    }
    let needle = query.to_lowercase();
    orders
        .iter()
        .filter(|order| {
            contains_lowercase(&order.numero_orden, &needle)
                || contains_lowercase(&order.usuario_correo, &needle)
                || contains_lowercase(&order.usuario_nombre, &needle)
        })
        .collect()
}
