//! Product records as the store lists them, and the searches run over them.

mod price;

pub use crate::catalog::price::format_clp;

use crate::str_utils::contains_lowercase;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub codigo: String,

    pub nombre: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub descripcion: String,

    pub precio: f64,

    #[serde(default)]
    pub stock: u32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub stock_critico: u32,

    #[serde(default)]
    pub categoria_id: Option<u32>,

    #[serde(default)]
    pub imagen: Option<String>,
}

impl Product {
    /// Stock at or below the critical level.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_critico
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub nombre: String,
}

/// Storefront filter: an optional category plus free text matched against
/// the product name and description.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StoreQuery {
    pub category: Option<u32>,
    pub search: String,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Option<u32>) -> Self {
        self.mutate_clone(|x| x.category = category)
    }

    pub fn search(&self, search: &str) -> Self {
        self.mutate_clone(|x| x.search = search.to_string())
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.categoria_id != Some(category) {
                return false;
            }
        }
        if self.search.trim().is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        contains_lowercase(&product.nombre, &needle)
            || contains_lowercase(&product.descripcion, &needle)
    }

    /// Matching products, in their original order.
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

/// Back-office product search over code and name. A blank query keeps every
/// product.
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.trim().is_empty() {
        return products.iter().collect();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            contains_lowercase(&p.codigo, &needle) || contains_lowercase(&p.nombre, &needle)
        })
        .collect()
}
