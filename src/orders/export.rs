use crate::orders::Order;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

pub const ORDER_CSV_HEADERS: [&str; 12] = [
    "Folio",
    "Fecha",
    "Cliente",
    "Correo",
    "Dirección",
    "Región",
    "Comuna",
    "Items",
    "Subtotal",
    "Envío",
    "Total",
    "Estado",
];

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Short Chilean date and time, e.g. `5 mar 2024, 14:07`. Missing dates
/// display as `-`.
pub fn format_order_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(date) => format!(
            "{} {} {}, {:02}:{:02}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year(),
            date.hour(),
            date.minute()
        ),
        None => "-".to_string(),
    }
}

/// `ordenes_2024-03-05.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ordenes_{}.csv", date.format("%Y-%m-%d"))
}

/// Renders the order list as CSV: an unquoted header line, then one row per
/// order with every cell quoted and inner quotes doubled. Lines are joined
/// with `\n` and there is no trailing newline.
pub fn export_orders_csv(orders: &[Order]) -> String {
    let mut lines = Vec::with_capacity(orders.len() + 1);
    lines.push(ORDER_CSV_HEADERS.join(","));
    for order in orders {
        let row = row_cells(order)
            .iter()
            .map(|cell| quote(cell))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    debug!(rows = orders.len(), "exported orders");
    lines.join("\n")
}

fn row_cells(order: &Order) -> [String; 12] {
    let items = order
        .items
        .iter()
        .map(|item| {
            format!(
                "{} x {} @ {}",
                item.producto_nombre, item.cantidad, item.precio_unitario
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");

    [
        order.numero_orden.clone(),
        format_order_date(order.fecha_creacion),
        order.usuario_nombre.clone(),
        order.usuario_correo.clone(),
        order.direccion_envio.clone(),
        order.region_envio.clone(),
        order.comuna_envio.clone(),
        items,
        order.subtotal.to_string(),
        order.shipping_cost().to_string(),
        order.total.to_string(),
        order
            .estado
            .map(|estado| estado.to_string())
            .unwrap_or_default(),
    ]
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
