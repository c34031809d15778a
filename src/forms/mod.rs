//! Field validation for every form the store front-end submits.
//!
//! Each form takes the raw text the user typed and either produces the
//! cleaned payload forwarded to the backend or a set of per-field messages.

mod config;
mod login;
mod password_recovery;
mod product_admin;
mod registration;
mod user_admin;

pub use crate::forms::config::FormConfig;
pub use crate::forms::login::{LoginForm, LoginPayload};
pub use crate::forms::password_recovery::{PasswordRecoveryForm, PasswordRecoveryPayload};
pub use crate::forms::product_admin::{ProductForm, ProductPayload};
pub use crate::forms::registration::{RegistrationForm, RegistrationPayload};
pub use crate::forms::user_admin::{UserForm, UserPayload, DEFAULT_NEW_USER_PASSWORD};

use crate::identity::{validate_identity, ValidationStatus};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Vendedor,
    Cliente,
}

impl Role {
    /// Roles allowed into the back-office.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Vendedor)
    }
}

/// Form fields, named as the backend names them.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Field {
    #[serde(rename = "run")]
    #[strum(serialize = "run")]
    Run,
    #[serde(rename = "correo")]
    #[strum(serialize = "correo")]
    Email,
    #[serde(rename = "confirmEmail")]
    #[strum(serialize = "confirmEmail")]
    ConfirmEmail,
    #[serde(rename = "password")]
    #[strum(serialize = "password")]
    Password,
    #[serde(rename = "confirmPassword")]
    #[strum(serialize = "confirmPassword")]
    ConfirmPassword,
    #[serde(rename = "nombres")]
    #[strum(serialize = "nombres")]
    FirstNames,
    #[serde(rename = "apellidos")]
    #[strum(serialize = "apellidos")]
    LastNames,
    #[serde(rename = "rol")]
    #[strum(serialize = "rol")]
    Role,
    #[serde(rename = "direccion")]
    #[strum(serialize = "direccion")]
    Address,
    #[serde(rename = "regionId")]
    #[strum(serialize = "regionId")]
    Region,
    #[serde(rename = "comunaId")]
    #[strum(serialize = "comunaId")]
    Commune,
    #[serde(rename = "codigo")]
    #[strum(serialize = "codigo")]
    Code,
    #[serde(rename = "nombre")]
    #[strum(serialize = "nombre")]
    Name,
    #[serde(rename = "descripcion")]
    #[strum(serialize = "descripcion")]
    Description,
    #[serde(rename = "precio")]
    #[strum(serialize = "precio")]
    Price,
    #[serde(rename = "stock")]
    #[strum(serialize = "stock")]
    Stock,
    #[serde(rename = "stockCritico")]
    #[strum(serialize = "stockCritico")]
    CriticalStock,
    #[serde(rename = "categoriaId")]
    #[strum(serialize = "categoriaId")]
    Category,
}

/// Messages to show next to each offending field, in field order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already failed.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// The message forms with a single error banner display.
    pub fn first(&self) -> Option<(Field, &str)> {
        self.0
            .iter()
            .next()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    fn into_result<T>(self, payload: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(payload())
        } else {
            Err(self)
        }
    }
}

/// Length limits applied by the forms. Lengths count characters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FormLimits {
    pub password_min: usize,
    pub password_max: usize,
    pub name_max: usize,
    pub email_max: usize,
    pub address_max: usize,
    pub product_code_min: usize,
    pub product_code_max: usize,
    pub product_name_max: usize,
    pub product_description_max: usize,
}

impl Default for FormLimits {
    fn default() -> Self {
        FormLimits {
            password_min: 4,
            password_max: 10,
            name_max: 50,
            email_max: 100,
            address_max: 200,
            product_code_min: 3,
            product_code_max: 20,
            product_name_max: 100,
            product_description_max: 500,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Checks a required free-text field with an upper length bound.
fn check_text(
    errors: &mut FieldErrors,
    field: Field,
    value: &str,
    label: &str,
    max: Option<usize>,
) {
    if is_blank(value) {
        errors.add(field, format!("{label} is required"));
    } else if let Some(max) = max {
        if char_len(value) > max {
            errors.add(field, format!("{label} cannot exceed {max} characters"));
        }
    }
}

/// Validates a RUN field and returns the normalized identity when it passes.
fn check_run(errors: &mut FieldErrors, raw: &str, metrics: &FormMetrics) -> Option<String> {
    let result = validate_identity(raw);
    metrics.record_identity(result.status);
    match result.status {
        ValidationStatus::Valid => result.normalized,
        ValidationStatus::Empty => {
            errors.add(Field::Run, "RUN is required");
            None
        }
        ValidationStatus::InvalidFormat => {
            errors.add(
                Field::Run,
                format!(
                    "invalid RUN: {}",
                    result.reason.unwrap_or_else(|| "bad format".to_string())
                ),
            );
            None
        }
        ValidationStatus::InvalidChecksum => {
            errors.add(Field::Run, "invalid RUN: the check digit does not match");
            None
        }
    }
}

fn check_selected(errors: &mut FieldErrors, field: Field, value: Option<u32>, label: &str) -> u32 {
    match value {
        Some(id) => id,
        None => {
            errors.add(field, format!("select a {label}"));
            0
        }
    }
}
