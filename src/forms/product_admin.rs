use crate::forms::{char_len, check_text, is_blank, Field, FieldErrors, FormConfig};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};

/// Back-office product create/edit form. Numeric fields hold the text typed.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio: String,
    pub stock: String,
    pub stock_critico: String,
    pub categoria_id: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub stock: u32,
    pub stock_critico: u32,
    pub categoria_id: u32,
}

impl ProductForm {
    pub fn validate(&self, config: &FormConfig) -> Result<ProductPayload, FieldErrors> {
        let metrics = FormMetrics::new("product_administration", &config.labels);
        let limits = &config.limits;
        let mut errors = FieldErrors::new();

        if is_blank(&self.codigo) {
            errors.add(Field::Code, "Code is required");
        } else if char_len(&self.codigo) < limits.product_code_min {
            errors.add(
                Field::Code,
                format!(
                    "Code must have at least {} characters",
                    limits.product_code_min
                ),
            );
        } else if char_len(&self.codigo) > limits.product_code_max {
            errors.add(
                Field::Code,
                format!("Code cannot exceed {} characters", limits.product_code_max),
            );
        }

        check_text(
            &mut errors,
            Field::Name,
            &self.nombre,
            "Name",
            Some(limits.product_name_max),
        );

        if char_len(&self.descripcion) > limits.product_description_max {
            errors.add(
                Field::Description,
                format!(
                    "Description cannot exceed {} characters",
                    limits.product_description_max
                ),
            );
        }

        let precio = match self.precio.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => price,
            _ => {
                errors.add(Field::Price, "Price must be greater than 0");
                0.0
            }
        };
        let stock = parse_count(&mut errors, Field::Stock, &self.stock, "Stock");
        let stock_critico = parse_count(
            &mut errors,
            Field::CriticalStock,
            &self.stock_critico,
            "Critical stock",
        );

        if self.categoria_id.is_none() {
            errors.add(Field::Category, "Select a category");
        }

        metrics.record_outcome(errors.is_empty());
        errors.into_result(|| ProductPayload {
            codigo: self.codigo.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            precio,
            stock,
            stock_critico,
            categoria_id: self.categoria_id.unwrap_or_default(),
        })
    }
}

fn parse_count(errors: &mut FieldErrors, field: Field, value: &str, label: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(count) => count,
        Err(_) => {
            errors.add(field, format!("{label} must be a whole number of at least 0"));
            0
        }
    }
}
